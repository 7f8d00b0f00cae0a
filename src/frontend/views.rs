//! HTML pages

use serde::Deserialize;

use crate::models::{
    bill::Bill,
    booking::BookingDetails,
    cylinder::Cylinder,
    enums::{
        BookingStatus, ConnectionStatus, ConnectionType, CylinderStatus, CylinderType,
        DeliveryOption, EntityStatus, PaymentMode, TimeSlot, UserRole,
    },
    supplier::Supplier,
    user::{BookingEligibility, User},
};

/// Messages carried across redirects in the query string
#[derive(Debug, Default, Deserialize)]
pub struct Flash {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl Flash {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: None,
            error: Some(message.into()),
        }
    }
}

const STYLE: &str = "body{font-family:sans-serif;margin:0;background:#f5f6f8}\
header{background:#1d3557;color:#fff;padding:12px 24px}header a{color:#fff;margin-right:16px}\
main{padding:24px}table{border-collapse:collapse;width:100%;background:#fff}\
th,td{border:1px solid #ccd;padding:6px 8px;text-align:left}\
.flash{padding:10px;margin-bottom:16px}.ok{background:#d8f3dc}.err{background:#ffd6d6}\
form.inline{display:inline}label{display:block;margin-top:8px}";

/// Escape text for HTML element and attribute content
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, nav: &str, flash: &Flash, body: &str) -> String {
    let mut notices = String::new();
    if let Some(message) = &flash.message {
        notices.push_str(&format!(r#"<div class="flash ok">{}</div>"#, escape(message)));
    }
    if let Some(error) = &flash.error {
        notices.push_str(&format!(r#"<div class="flash err">{}</div>"#, escape(error)));
    }
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{title} - Fuel Pro</title><style>{style}</style></head>
<body>
<header><strong>Fuel Pro</strong> &nbsp; {nav}</header>
<main>
<h1>{title}</h1>
{notices}
{body}
</main>
</body>
</html>"#,
        title = escape(title),
        style = STYLE,
        nav = nav,
        notices = notices,
        body = body
    )
}

fn admin_nav(admin_id: i64) -> String {
    format!(
        r#"<a href="/dashboard/ADMIN/{id}">Dashboard</a><a href="/admin/{id}/users">Customers</a><a href="/admin/{id}/suppliers">Suppliers</a><a href="/admin/{id}/cylinders">Cylinders</a><a href="/admin/{id}/reports">Bookings</a><a href="/login">Logout</a>"#,
        id = admin_id
    )
}

fn customer_nav(user_id: i64) -> String {
    format!(
        r#"<a href="/dashboard/CUSTOMER/{id}">Dashboard</a><a href="/customers/{id}/bookings">My bookings</a><a href="/customers/{id}/bookings/new">Book a cylinder</a><a href="/customers/{id}/bills">My bills</a><a href="/login">Logout</a>"#,
        id = user_id
    )
}

fn public_nav() -> &'static str {
    r#"<a href="/">Home</a><a href="/login">Login</a>"#
}

/// `<option>` list for a text enum, with `selected` on the current value
fn options<T: Copy + PartialEq>(all: &[T], selected: Option<T>, value: impl Fn(T) -> String, label: impl Fn(T) -> String) -> String {
    all.iter()
        .map(|item| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                escape(&value(*item)),
                if Some(*item) == selected { " selected" } else { "" },
                escape(&label(*item))
            )
        })
        .collect()
}

fn post_button(action: &str, label: &str) -> String {
    format!(
        r#"<form class="inline" method="post" action="{}"><button type="submit">{}</button></form>"#,
        escape(action),
        escape(label)
    )
}

pub fn error_page(message: &str) -> String {
    layout(
        "Something went wrong",
        public_nav(),
        &Flash::error(message),
        r#"<p><a href="javascript:history.back()">Go back</a></p>"#,
    )
}

pub fn home() -> String {
    layout(
        "Welcome",
        public_nav(),
        &Flash::default(),
        "<p>Book LPG cylinders online, track deliveries and view your bills.</p>\
         <p><a href=\"/login\">Sign in</a> with the user ID and password sent to your email.</p>",
    )
}

pub fn login_page(flash: &Flash) -> String {
    let roles = options(UserRole::ALL, Some(UserRole::Customer), |r| r.as_str().to_string(), |r| r.as_str().to_string());
    let body = format!(
        r#"<form method="post" action="/login">
<label>User ID <input name="user_id" required></label>
<label>Password <input name="password" type="password" required></label>
<label>Role <select name="role">{roles}</select></label>
<p><button type="submit">Login</button></p>
</form>"#,
        roles = roles
    );
    layout("Login", public_nav(), flash, &body)
}

pub fn dashboard(user: &User, flash: &Flash) -> String {
    let (nav, links) = match user.role {
        UserRole::Admin => (
            admin_nav(user.id),
            format!(
                r#"<ul><li><a href="/admin/{id}/users">Manage customers</a></li><li><a href="/admin/{id}/suppliers">Manage suppliers</a></li><li><a href="/admin/{id}/cylinders">Manage cylinders</a></li><li><a href="/admin/{id}/reports">Booking reports</a></li></ul>"#,
                id = user.id
            ),
        ),
        UserRole::Customer => (
            customer_nav(user.id),
            format!(
                r#"<ul><li><a href="/customers/{id}/bookings/new">Book a cylinder</a></li><li><a href="/customers/{id}/bookings">My bookings</a></li><li><a href="/customers/{id}/bills">My bills</a></li></ul>"#,
                id = user.id
            ),
        ),
    };
    let body = format!(
        "<p>Welcome, {} ({}).</p>{}",
        escape(&user.full_name()),
        user.role,
        links
    );
    layout("Dashboard", &nav, flash, &body)
}

pub fn users_page(admin_id: i64, users: &[User], flash: &Flash) -> String {
    let rows: String = users
        .iter()
        .map(|u| {
            let toggle = match u.connection_status {
                ConnectionStatus::Active => "Deactivate",
                ConnectionStatus::Inactive => "Activate",
            };
            format!(
                "<tr><td>{id}</td><td>{name}</td><td>{email}</td><td>{phone}</td><td>{ctype}</td><td>{status}</td><td>{role}</td><td><a href=\"/admin/{admin}/users/{id}/edit\">Edit</a> {toggle}</td></tr>",
                id = u.id,
                name = escape(&u.full_name()),
                email = escape(&u.email),
                phone = escape(u.phone.as_deref().unwrap_or("-")),
                ctype = u.connection_type,
                status = u.connection_status,
                role = u.role,
                admin = admin_id,
                toggle = post_button(&format!("/admin/{}/users/{}/toggle", admin_id, u.id), toggle)
            )
        })
        .collect();

    let types = options(ConnectionType::ALL, None, |t| t.as_str().to_string(), |t| t.as_str().to_string());
    let body = format!(
        r#"<table><tr><th>ID</th><th>Name</th><th>Email</th><th>Phone</th><th>Connection</th><th>Status</th><th>Role</th><th></th></tr>{rows}</table>
<h2>Register a customer</h2>
<form method="post" action="/admin/{admin}/users">
<label>First name <input name="first_name" required></label>
<label>Last name <input name="last_name" required></label>
<label>Email <input name="email" type="email" required></label>
<label>Phone <input name="phone" pattern="[0-9]{{10}}"></label>
<label>Address <input name="address"></label>
<label>Connection type <select name="connection_type">{types}</select></label>
<p><button type="submit">Register</button></p>
</form>"#,
        rows = rows,
        admin = admin_id,
        types = types
    );
    layout("Customer management", &admin_nav(admin_id), flash, &body)
}

pub fn user_edit_page(admin_id: i64, user: &User, flash: &Flash) -> String {
    let types = options(ConnectionType::ALL, Some(user.connection_type), |t| t.as_str().to_string(), |t| t.as_str().to_string());
    let body = format!(
        r#"<p>{name} (ID {id})</p>
<form method="post" action="/admin/{admin}/users/{id}/edit">
<label>Email <input name="email" type="email" value="{email}" required></label>
<label>Phone <input name="phone" value="{phone}" pattern="[0-9]{{10}}"></label>
<label>Address <input name="address" value="{address}"></label>
<label>Connection type <select name="connection_type">{types}</select></label>
<p><button type="submit">Save</button></p>
</form>"#,
        name = escape(&user.full_name()),
        id = user.id,
        admin = admin_id,
        email = escape(&user.email),
        phone = escape(user.phone.as_deref().unwrap_or("")),
        address = escape(user.address.as_deref().unwrap_or("")),
        types = types
    );
    layout("Edit customer", &admin_nav(admin_id), flash, &body)
}

fn booking_rows(bookings: &[BookingDetails], actions: impl Fn(&BookingDetails) -> String) -> String {
    bookings
        .iter()
        .map(|b| {
            format!(
                "<tr><td>{id}</td><td>{customer}</td><td>{cylinder} ({ctype})</td><td>{date}</td><td>{delivery}</td><td>{slot}</td><td>{payment} / {pstatus}</td><td>{status}</td><td>{total}</td><td>{actions}</td></tr>",
                id = b.id,
                customer = escape(&format!("{} {}", b.user.first_name, b.user.last_name)),
                cylinder = b.cylinder.id,
                ctype = b.cylinder.cylinder_type,
                date = b.booking_date,
                delivery = b.delivery_date,
                slot = b.time_slot.label(),
                payment = b.payment_mode,
                pstatus = b.payment_status,
                status = b.booking_status,
                total = b.bill.as_ref().map(|bill| format!("{:.2}", bill.total_price)).unwrap_or_default(),
                actions = actions(b)
            )
        })
        .collect()
}

const BOOKING_HEADER: &str = "<tr><th>ID</th><th>Customer</th><th>Cylinder</th><th>Booked</th><th>Delivery</th><th>Slot</th><th>Payment</th><th>Status</th><th>Total</th><th></th></tr>";

fn is_open(status: BookingStatus) -> bool {
    matches!(status, BookingStatus::Pending | BookingStatus::Confirmed)
}

pub fn bookings_page(user_id: i64, bookings: &[BookingDetails], flash: &Flash) -> String {
    let rows = booking_rows(bookings, |b| {
        if is_open(b.booking_status) {
            post_button(&format!("/customers/{}/bookings/{}/cancel", user_id, b.id), "Cancel")
        } else {
            String::new()
        }
    });
    let body = if bookings.is_empty() {
        format!(
            r#"<p>No bookings yet. <a href="/customers/{}/bookings/new">Book a cylinder</a>.</p>"#,
            user_id
        )
    } else {
        format!("<table>{}{}</table>", BOOKING_HEADER, rows)
    };
    layout("My bookings", &customer_nav(user_id), flash, &body)
}

pub fn booking_form(
    user_id: i64,
    cylinders: &[Cylinder],
    eligibility: &BookingEligibility,
    interval_days: i64,
    flash: &Flash,
) -> String {
    let hint = match (eligibility.eligible, eligibility.next_eligible_date) {
        (false, Some(next)) => format!(
            r#"<div class="flash err">You can book only one cylinder every {} days. Your next booking is allowed from {}.</div>"#,
            interval_days, next
        ),
        _ => format!(
            "<p>Note: one cylinder can be booked every {} days.</p>",
            interval_days
        ),
    };

    let cylinder_options: String = cylinders
        .iter()
        .filter(|c| c.status == CylinderStatus::Available)
        .map(|c| {
            format!(
                r#"<option value="{}">#{} - {} (refilled {})</option>"#,
                c.id, c.id, c.cylinder_type, c.last_refill_date
            )
        })
        .collect();
    let slots = options(TimeSlot::ALL, None, |s| s.as_str().to_string(), |s| s.label().to_string());
    let deliveries = options(DeliveryOption::ALL, None, |d| d.as_str().to_string(), |d| d.label().to_string());
    let payments = options(PaymentMode::ALL, None, |p| p.as_str().to_string(), |p| p.as_str().to_string());

    let body = format!(
        r#"{hint}
<form method="post" action="/customers/{user}/bookings">
<label>Cylinder <select name="cylinder_id" required>{cylinders}</select></label>
<label>Time slot <select name="time_slot">{slots}</select></label>
<label>Delivery <select name="delivery_option">{deliveries}</select></label>
<label>Scheduled date (scheduled delivery only) <input name="delivery_date" type="date"></label>
<label>Payment mode <select name="payment_mode">{payments}</select></label>
<p><button type="submit"{disabled}>Book</button></p>
</form>"#,
        hint = hint,
        user = user_id,
        cylinders = cylinder_options,
        slots = slots,
        deliveries = deliveries,
        payments = payments,
        disabled = if eligibility.eligible { "" } else { " disabled" }
    );
    layout("Book a cylinder", &customer_nav(user_id), flash, &body)
}

pub fn bills_page(user_id: i64, bills: &[Bill], flash: &Flash) -> String {
    let rows: String = bills
        .iter()
        .map(|b| {
            format!(
                r#"<tr><td><a href="/customers/{user}/bills/{id}">{id}</a></td><td>{booking}</td><td>{total:.2}</td></tr>"#,
                user = user_id,
                id = b.id,
                booking = b.booking_id,
                total = b.total_price
            )
        })
        .collect();
    let body = format!(
        "<table><tr><th>Bill</th><th>Booking</th><th>Total</th></tr>{}</table>",
        rows
    );
    layout("My bills", &customer_nav(user_id), flash, &body)
}

pub fn bill_page(user_id: i64, bill: &Bill) -> String {
    let body = format!(
        r#"<table>
<tr><th>Booking</th><td>{booking}</td></tr>
<tr><th>Cylinder price</th><td>{price:.2}</td></tr>
<tr><th>GST</th><td>{gst:.2}</td></tr>
<tr><th>Delivery charge</th><td>{delivery:.2}</td></tr>
<tr><th>CLE charge</th><td>{cle:.2}</td></tr>
<tr><th>Total</th><td><strong>{total:.2}</strong></td></tr>
</table>
<p><a href="/customers/{user}/bills">Back to bills</a></p>"#,
        booking = bill.booking_id,
        price = bill.price,
        gst = bill.gst,
        delivery = bill.delivery_charge,
        cle = bill.cle_charge,
        total = bill.total_price,
        user = user_id
    );
    layout(&format!("Bill #{}", bill.id), &customer_nav(user_id), &Flash::default(), &body)
}

pub fn suppliers_page(admin_id: i64, suppliers: &[Supplier], flash: &Flash) -> String {
    let rows: String = suppliers
        .iter()
        .map(|s| {
            let action = match s.status {
                EntityStatus::Active => post_button(&format!("/admin/{}/suppliers/{}/deactivate", admin_id, s.id), "Deactivate"),
                EntityStatus::Inactive => post_button(&format!("/admin/{}/suppliers/{}/activate", admin_id, s.id), "Activate"),
            };
            format!(
                "<tr><td>{id}</td><td>{name}</td><td>{contact}</td><td>{phone}</td><td>{email}</td><td>{license}</td><td>{count}</td><td>{status}</td><td><a href=\"/admin/{admin}/suppliers/{id}/edit\">Edit</a> {action}</td></tr>",
                id = s.id,
                name = escape(&s.name),
                contact = escape(&s.contact_person),
                phone = escape(&s.phone),
                email = escape(&s.email),
                license = s.license_number,
                count = s.cylinder_count,
                status = s.status,
                admin = admin_id,
                action = action
            )
        })
        .collect();
    let body = format!(
        r#"<p><a href="/admin/{admin}/suppliers/new">Add supplier</a> | <a href="/admin/{admin}/suppliers/pdf?status=ACTIVE">Active suppliers PDF</a> | <a href="/admin/{admin}/suppliers/pdf?status=INACTIVE">Inactive suppliers PDF</a></p>
<table><tr><th>ID</th><th>Name</th><th>Contact</th><th>Phone</th><th>Email</th><th>License</th><th>Cylinders</th><th>Status</th><th></th></tr>{rows}</table>"#,
        admin = admin_id,
        rows = rows
    );
    layout("Supplier management", &admin_nav(admin_id), flash, &body)
}

pub fn supplier_form(admin_id: i64, supplier: Option<&Supplier>, flash: &Flash) -> String {
    let (title, action) = match supplier {
        Some(s) => ("Edit supplier", format!("/admin/{}/suppliers/{}/edit", admin_id, s.id)),
        None => ("Add supplier", format!("/admin/{}/suppliers/new", admin_id)),
    };
    let value = |f: fn(&Supplier) -> String| supplier.map(f).map(|v| escape(&v)).unwrap_or_default();
    let body = format!(
        r#"<form method="post" action="{action}">
<label>Name <input name="name" value="{name}" maxlength="100" required></label>
<label>Contact person <input name="contact_person" value="{contact}" maxlength="100" required></label>
<label>Phone <input name="phone" value="{phone}" pattern="[0-9]{{10}}" required></label>
<label>Email <input name="email" type="email" value="{email}" required></label>
<label>Address <input name="address" value="{address}" maxlength="255" required></label>
<label>License number <input name="license_number" value="{license}" pattern="[0-9]{{4,9}}" required></label>
<p><button type="submit">Save</button></p>
</form>"#,
        action = escape(&action),
        name = value(|s| s.name.clone()),
        contact = value(|s| s.contact_person.clone()),
        phone = value(|s| s.phone.clone()),
        email = value(|s| s.email.clone()),
        address = value(|s| s.address.clone()),
        license = value(|s| s.license_number.to_string())
    );
    layout(title, &admin_nav(admin_id), flash, &body)
}

pub fn cylinders_page(admin_id: i64, cylinders: &[Cylinder], flash: &Flash) -> String {
    let rows: String = cylinders
        .iter()
        .map(|c| {
            format!(
                "<tr><td>{id}</td><td>{ctype}</td><td>{status}</td><td>{refill}</td><td>{supplier}</td><td><a href=\"/admin/{admin}/cylinders/{id}/edit\">Edit</a> {delete}</td></tr>",
                id = c.id,
                ctype = c.cylinder_type,
                status = c.status,
                refill = c.last_refill_date,
                supplier = c.supplier_id,
                admin = admin_id,
                delete = post_button(&format!("/admin/{}/cylinders/{}/delete", admin_id, c.id), "Delete")
            )
        })
        .collect();
    let body = format!(
        r#"<p><a href="/admin/{admin}/cylinders/new">Add cylinder</a></p>
<table><tr><th>ID</th><th>Type</th><th>Status</th><th>Last refill</th><th>Supplier</th><th></th></tr>{rows}</table>"#,
        admin = admin_id,
        rows = rows
    );
    layout("Cylinder management", &admin_nav(admin_id), flash, &body)
}

pub fn cylinder_form(
    admin_id: i64,
    cylinder: Option<&Cylinder>,
    suppliers: &[Supplier],
    flash: &Flash,
) -> String {
    let types = options(CylinderType::ALL, cylinder.map(|c| c.cylinder_type), |t| t.as_str().to_string(), |t| t.as_str().to_string());
    let statuses = options(
        CylinderStatus::ALL,
        Some(cylinder.map(|c| c.status).unwrap_or(CylinderStatus::Available)),
        |s| s.as_str().to_string(),
        |s| s.as_str().to_string(),
    );
    let refill = cylinder.map(|c| c.last_refill_date.to_string()).unwrap_or_default();

    let (title, action, supplier_field) = match cylinder {
        Some(c) => (
            "Edit cylinder",
            format!("/admin/{}/cylinders/{}/edit", admin_id, c.id),
            format!("<p>Supplier: {}</p>", c.supplier_id),
        ),
        None => {
            let supplier_options: String = suppliers
                .iter()
                .filter(|s| s.status == EntityStatus::Active)
                .map(|s| format!(r#"<option value="{}">{}</option>"#, s.id, escape(&s.name)))
                .collect();
            (
                "Add cylinder",
                format!("/admin/{}/cylinders/new", admin_id),
                format!(
                    r#"<label>Supplier <select name="supplier_id" required>{}</select></label>"#,
                    supplier_options
                ),
            )
        }
    };

    let body = format!(
        r#"<form method="post" action="{action}">
{supplier_field}
<label>Type <select name="cylinder_type">{types}</select></label>
<label>Status <select name="status">{statuses}</select></label>
<label>Last refill date <input name="last_refill_date" type="date" value="{refill}" required></label>
<p><button type="submit">Save</button></p>
</form>"#,
        action = escape(&action),
        supplier_field = supplier_field,
        types = types,
        statuses = statuses,
        refill = refill
    );
    layout(title, &admin_nav(admin_id), flash, &body)
}

pub fn reports_page(admin_id: i64, bookings: &[BookingDetails], flash: &Flash) -> String {
    let rows = booking_rows(bookings, |b| {
        let mut actions = String::new();
        if is_open(b.booking_status) {
            actions.push_str(&post_button(&format!("/admin/{}/bookings/{}/cancel", admin_id, b.id), "Cancel"));
        }
        if b.booking_status != BookingStatus::Cancelled && b.booking_status != BookingStatus::Delivered {
            actions.push_str(&post_button(&format!("/admin/{}/bookings/{}/deliver", admin_id, b.id), "Delivered"));
        }
        actions
    });
    let body = format!("<table>{}{}</table>", BOOKING_HEADER, rows);
    layout("Booking reports", &admin_nav(admin_id), flash, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn customer() -> User {
        User {
            id: 1234567890,
            password_hash: String::new(),
            first_name: "Anita".to_string(),
            last_name: "<script>".to_string(),
            email: "anita@example.com".to_string(),
            phone: Some("9876543210".to_string()),
            address: None,
            registration_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            connection_status: ConnectionStatus::Active,
            connection_type: ConnectionType::Domestic,
            role: UserRole::Customer,
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_dashboard_escapes_names_and_links_by_role() {
        let page = dashboard(&customer(), &Flash::default());
        assert!(page.contains("Anita &lt;script&gt;"));
        assert!(!page.contains("<script>"));
        assert!(page.contains("/customers/1234567890/bookings/new"));
        assert!(!page.contains("/admin/"));
    }

    #[test]
    fn test_flash_messages_rendered() {
        let flash = Flash {
            message: Some("Saved".to_string()),
            error: Some("Cylinder 4 is Booked".to_string()),
        };
        let page = login_page(&flash);
        assert!(page.contains(r#"<div class="flash ok">Saved</div>"#));
        assert!(page.contains(r#"<div class="flash err">Cylinder 4 is Booked</div>"#));
    }

    #[test]
    fn test_booking_form_shows_restriction() {
        let eligibility = BookingEligibility {
            eligible: false,
            last_booking_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            next_eligible_date: NaiveDate::from_ymd_opt(2024, 3, 31),
        };
        let cylinders = vec![
            Cylinder {
                id: 11,
                cylinder_type: CylinderType::Domestic,
                status: CylinderStatus::Available,
                last_refill_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                supplier_id: 1,
            },
            Cylinder {
                id: 12,
                cylinder_type: CylinderType::Domestic,
                status: CylinderStatus::Booked,
                last_refill_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                supplier_id: 1,
            },
        ];
        let page = booking_form(7, &cylinders, &eligibility, 30, &Flash::default());
        assert!(page.contains("allowed from 2024-03-31"));
        assert!(page.contains(r#"<option value="11">"#));
        assert!(!page.contains(r#"<option value="12">"#));
        assert!(page.contains("<button type=\"submit\" disabled>"));
    }

    #[test]
    fn test_options_marks_selected() {
        let html = options(ConnectionType::ALL, Some(ConnectionType::Commercial), |t| t.as_str().to_string(), |t| t.as_str().to_string());
        assert!(html.contains(r#"<option value="COMMERCIAL" selected>COMMERCIAL</option>"#));
        assert!(html.contains(r#"<option value="DOMESTIC">DOMESTIC</option>"#));
    }
}
