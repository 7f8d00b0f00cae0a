//! Email templates

use crate::models::{
    booking::BookingDetails,
    enums::ConnectionStatus,
    supplier::{InventoryCounts, Supplier},
    user::User,
};

use super::email::{EmailAttachment, OutgoingEmail};

const SIGNATURE: &str = "Best regards,\nFuel Pro Management System";

fn supplier_details(supplier: &Supplier) -> String {
    format!(
        "Supplier ID: {}\nSupplier Name: {}\nContact Person: {}\nMobile Number: {}\nEmail: {}\nAddress: {}\nLicense Number: {}\nStatus: {}",
        supplier.id,
        supplier.name,
        supplier.contact_person,
        supplier.phone,
        supplier.email,
        supplier.address,
        supplier.license_number,
        supplier.status
    )
}

/// Login credentials for a newly registered user
pub fn user_credentials(user: &User, password: &str) -> OutgoingEmail {
    let body = format!(
        "Dear {},\n\nYour account has been successfully registered.\nHere are your login details:\n\nUser ID: {}\nEmail: {}\nPassword: {}\nConnection Type: {}\nRegistration Date: {}\n\nPlease keep these credentials safe.\n\n{}",
        user.full_name(),
        user.id,
        user.email,
        password,
        user.connection_type,
        user.registration_date,
        SIGNATURE
    );
    OutgoingEmail::new(
        &user.email,
        "Welcome to Fuel Pro Management System - Your Login Credentials",
        body,
    )
}

pub fn user_updated(user: &User) -> OutgoingEmail {
    let body = format!(
        "Dear {},\n\nYour account details have been updated successfully. Here are your updated details:\n\nFirst Name: {}\nLast Name: {}\nEmail: {}\nPhone: {}\nAddress: {}\nConnection Status: {}\nConnection Type: {}\n\n{}",
        user.first_name,
        user.first_name,
        user.last_name,
        user.email,
        user.phone.as_deref().unwrap_or("-"),
        user.address.as_deref().unwrap_or("-"),
        user.connection_status,
        user.connection_type,
        SIGNATURE
    );
    OutgoingEmail::new(&user.email, "Your Account Details Have Been Updated", body)
}

pub fn user_status_changed(user: &User) -> OutgoingEmail {
    let (subject, text) = match user.connection_status {
        ConnectionStatus::Active => (
            "Account Activation",
            "Your account has been activated successfully. You can now access all features of our platform.",
        ),
        ConnectionStatus::Inactive => (
            "Account Deactivation",
            "Your account has been deactivated. Please contact support if you need assistance.",
        ),
    };
    let body = format!("Dear {},\n\n{}\n\n{}", user.first_name, text, SIGNATURE);
    OutgoingEmail::new(&user.email, subject, body)
}

pub fn booking_confirmation(booking: &BookingDetails, invoice: Option<Vec<u8>>) -> OutgoingEmail {
    let total = booking
        .bill
        .as_ref()
        .map(|b| format!("Rs. {:.2}", b.total_price))
        .unwrap_or_else(|| "-".to_string());
    let body = format!(
        "Dear {},\n\nThank you for your booking!\n\nBooking ID: {}\nBooking Date: {}\nDelivery Date: {}\nTime Slot: {}\nPayment Status: {}\nCylinder Type: {}\nTotal: {}\n\n{}",
        booking.user.first_name,
        booking.id,
        booking.booking_date,
        booking.delivery_date,
        booking.time_slot.label(),
        booking.payment_status,
        booking.cylinder.cylinder_type,
        total,
        SIGNATURE
    );
    let attachment = invoice.map(|data| EmailAttachment {
        filename: format!("booking-{}.pdf", booking.id),
        content_type: "application/pdf".to_string(),
        data,
    });
    OutgoingEmail::new(
        &booking.user.email,
        format!("Booking Confirmation - ID: {}", booking.id),
        body,
    )
    .with_attachment(attachment)
}

pub fn booking_cancelled(booking: &BookingDetails) -> OutgoingEmail {
    let body = format!(
        "Hello {},\n\nYour booking (ID: {}) has been cancelled.\nIf you have any questions, please contact support.\n\n{}",
        booking.user.first_name, booking.id, SIGNATURE
    );
    OutgoingEmail::new(
        &booking.user.email,
        format!("Booking Cancelled - ID: {}", booking.id),
        body,
    )
}

pub fn supplier_welcome(supplier: &Supplier) -> OutgoingEmail {
    let body = format!(
        "Dear {},\n\nYour account has been successfully created. Below are your account details:\n\n{}\n\nThank you for joining Fuel Pro Management System.\n\n{}",
        supplier.name,
        supplier_details(supplier),
        SIGNATURE
    );
    OutgoingEmail::new(
        &supplier.email,
        format!("Welcome to Fuel Pro Management System - {}", supplier.name),
        body,
    )
}

pub fn supplier_updated(supplier: &Supplier) -> OutgoingEmail {
    let body = format!(
        "Dear {},\n\nYour account details have been updated. Below are your updated details:\n\n{}\n\nIf you did not make these changes, please contact our support team immediately.\n\n{}",
        supplier.name,
        supplier_details(supplier),
        SIGNATURE
    );
    OutgoingEmail::new(
        &supplier.email,
        format!("Account Details Updated - {}", supplier.name),
        body,
    )
}

/// Sent to the previous address when a supplier's email changes
pub fn supplier_email_changed(old_email: &str, supplier: &Supplier) -> OutgoingEmail {
    let body = format!(
        "Dear {},\n\nThe email address on your supplier account has been changed to {}.\nFuture notifications will be sent to the new address.\n\nIf you did not request this change, please contact our support team immediately.\n\n{}",
        supplier.name, supplier.email, SIGNATURE
    );
    OutgoingEmail::new(
        old_email,
        format!("Email Address Changed - {}", supplier.name),
        body,
    )
}

pub fn supplier_activated(supplier: &Supplier) -> OutgoingEmail {
    let body = format!(
        "Dear {},\n\nYour account has been activated. Below are your account details:\n\n{}\n\nThank you for being a valued partner of Fuel Pro Management System.\n\n{}",
        supplier.name,
        supplier_details(supplier),
        SIGNATURE
    );
    OutgoingEmail::new(
        &supplier.email,
        format!("Account Activated - {}", supplier.name),
        body,
    )
}

pub fn supplier_deactivated(supplier: &Supplier) -> OutgoingEmail {
    let body = format!(
        "Dear {},\n\nYour account has been deactivated. Below are your account details:\n\n{}\n\nIf you have any questions, please contact our support team.\n\n{}",
        supplier.name,
        supplier_details(supplier),
        SIGNATURE
    );
    OutgoingEmail::new(
        &supplier.email,
        format!("Account Deactivated - {}", supplier.name),
        body,
    )
}

pub fn cylinder_status_report(supplier: &Supplier, counts: &InventoryCounts) -> OutgoingEmail {
    let body = format!(
        "Dear {},\n\nDaily Cylinder Status Report:\n\nTotal Cylinders: {}\nAvailable: {}\nBooked: {}\nOut of Stock: {}\n\n{}",
        supplier.name,
        supplier.cylinder_count,
        counts.available,
        counts.booked,
        counts.out_of_stock,
        SIGNATURE
    );
    OutgoingEmail::new(
        &supplier.email,
        format!("Daily Cylinder Report - {}", supplier.name),
        body,
    )
}

pub fn low_inventory_alert(supplier: &Supplier, threshold: i32) -> OutgoingEmail {
    let body = format!(
        "Dear {},\n\nYour cylinder inventory is below the threshold!\n\nCurrent Inventory: {}\nThreshold: {}\n\nPlease restock immediately.\n\n{}",
        supplier.name, supplier.cylinder_count, threshold, SIGNATURE
    );
    OutgoingEmail::new(&supplier.email, "URGENT: Low Cylinder Inventory Alert", body)
}
