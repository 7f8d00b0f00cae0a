//! Booking invoice and supplier status report

use chrono::Local;

use super::{Column, Font, PdfWriter};
use crate::{
    error::AppResult,
    models::{booking::BookingDetails, enums::EntityStatus, supplier::Supplier},
};

pub fn booking_invoice(booking: &BookingDetails) -> AppResult<Vec<u8>> {
    let mut pdf = PdfWriter::new();

    pdf.title("Fuel Pro - Booking Invoice");
    pdf.write_line(
        10.0,
        Font::Regular,
        &format!("Generated on {}", Local::now().format("%Y-%m-%d %H:%M")),
    );

    pdf.heading("Customer Details");
    pdf.field("Customer ID", &booking.user.id.to_string());
    pdf.field(
        "Name",
        &format!("{} {}", booking.user.first_name, booking.user.last_name),
    );
    pdf.field("Email", &booking.user.email);
    pdf.field("Phone", booking.user.phone.as_deref().unwrap_or("-"));
    pdf.field("Address", booking.user.address.as_deref().unwrap_or("-"));

    pdf.heading("Booking Details");
    pdf.field("Booking ID", &booking.id.to_string());
    pdf.field("Booking Date", &booking.booking_date.to_string());
    pdf.field("Delivery Date", &booking.delivery_date.to_string());
    pdf.field("Time Slot", booking.time_slot.label());
    pdf.field("Delivery Option", booking.delivery_option.label());
    pdf.field(
        "Cylinder",
        &format!("#{} ({})", booking.cylinder.id, booking.cylinder.cylinder_type),
    );
    pdf.field("Quantity", &booking.cylinder_count.to_string());
    pdf.field("Booking Status", booking.booking_status.as_str());

    pdf.heading("Payment Details");
    pdf.field("Payment Mode", booking.payment_mode.as_str());
    pdf.field("Payment Status", booking.payment_status.as_str());
    match &booking.bill {
        Some(bill) => {
            pdf.field("Cylinder Price", &format!("Rs. {:.2}", bill.price));
            pdf.field("GST", &format!("Rs. {:.2}", bill.gst));
            pdf.field("Delivery Charge", &format!("Rs. {:.2}", bill.delivery_charge));
            pdf.field("CLE Charge", &format!("Rs. {:.2}", bill.cle_charge));
            pdf.rule();
            pdf.field("Total", &format!("Rs. {:.2}", bill.total_price));
        }
        None => pdf.field("Bill", "not available"),
    }

    pdf.spacer(20.0);
    pdf.write_line(10.0, Font::Regular, "Thank you for choosing Fuel Pro.");

    pdf.finish()
}

pub fn suppliers_report(status: EntityStatus, suppliers: &[Supplier]) -> AppResult<Vec<u8>> {
    let mut pdf = PdfWriter::new();

    pdf.title(&format!("{} Suppliers Report", status));
    pdf.write_line(
        10.0,
        Font::Regular,
        &format!(
            "Generated on {} - {} supplier(s)",
            Local::now().format("%Y-%m-%d %H:%M"),
            suppliers.len()
        ),
    );
    pdf.spacer(10.0);

    let columns = [
        Column { header: "ID", width: 40.0 },
        Column { header: "Name", width: 120.0 },
        Column { header: "Contact", width: 100.0 },
        Column { header: "Phone", width: 75.0 },
        Column { header: "Email", width: 100.0 },
        Column { header: "Status", width: 60.0 },
    ];
    let rows: Vec<Vec<String>> = suppliers
        .iter()
        .map(|s| {
            vec![
                s.id.to_string(),
                s.name.clone(),
                s.contact_person.clone(),
                s.phone.clone(),
                s.email.clone(),
                s.status.to_string(),
            ]
        })
        .collect();
    pdf.table(&columns, &rows);

    pdf.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::models::{
        bill::Bill,
        cylinder::Cylinder,
        enums::{
            BookingStatus, CylinderStatus, CylinderType, DeliveryOption, PaymentMode,
            PaymentStatus, TimeSlot,
        },
        user::UserShort,
    };

    fn booking() -> BookingDetails {
        let date = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        BookingDetails {
            id: 42,
            cylinder_count: 1,
            time_slot: TimeSlot::Morning,
            delivery_option: DeliveryOption::Express,
            payment_mode: PaymentMode::Upi,
            payment_status: PaymentStatus::Paid,
            booking_status: BookingStatus::Pending,
            booking_date: date,
            delivery_date: NaiveDate::from_ymd_opt(2024, 5, 12).unwrap(),
            user: UserShort {
                id: 1234567890,
                first_name: "Ravi".to_string(),
                last_name: "Kumar (Jr)".to_string(),
                email: "ravi@example.com".to_string(),
                phone: None,
                address: Some("12 MG Road".to_string()),
            },
            cylinder: Cylinder {
                id: 7,
                cylinder_type: CylinderType::Domestic,
                status: CylinderStatus::Booked,
                last_refill_date: date,
                supplier_id: 1,
            },
            bill: Some(Bill {
                id: 3,
                booking_id: 42,
                user_id: 1234567890,
                price: Decimal::new(1000, 0),
                gst: Decimal::new(50, 0),
                delivery_charge: Decimal::new(100, 0),
                cle_charge: Decimal::new(230, 0),
                total_price: Decimal::new(1380, 0),
            }),
        }
    }

    #[test]
    fn test_invoice_contains_booking_and_bill() {
        let bytes = booking_invoice(&booking()).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.starts_with("%PDF-1.4"));
        assert!(text.contains("(Fuel Pro - Booking Invoice) Tj"));
        assert!(text.contains("(Ravi Kumar \\(Jr\\)) Tj"));
        assert!(text.contains("(Rs. 1380.00) Tj"));
        assert!(text.contains("(Express Delivery \\(1-2 days\\)) Tj"));
    }

    #[test]
    fn test_suppliers_report_lists_rows() {
        let suppliers: Vec<Supplier> = (1..=3)
            .map(|i| Supplier {
                id: i,
                name: format!("Supplier {}", i),
                contact_person: "Meena".to_string(),
                phone: "9876543210".to_string(),
                email: format!("s{}@example.com", i),
                address: "Depot Road".to_string(),
                license_number: 100000 + i as i32,
                status: EntityStatus::Active,
                cylinder_count: 0,
            })
            .collect();
        let bytes = suppliers_report(EntityStatus::Active, &suppliers).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("(ACTIVE Suppliers Report) Tj"));
        assert!(text.contains("(Supplier 3) Tj"));
        assert!(text.contains("(s2@example.com) Tj"));
        assert!(text.trim_end().ends_with("%%EOF"));
    }
}
