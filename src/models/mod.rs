//! Data models for the fuel agency

pub mod bill;
pub mod booking;
pub mod cylinder;
pub mod enums;
pub mod supplier;
pub mod user;

// Re-export commonly used types
pub use bill::Bill;
pub use booking::{Booking, BookingDetails};
pub use cylinder::Cylinder;
pub use enums::{
    BookingStatus, ConnectionStatus, ConnectionType, CylinderStatus, CylinderType, DeliveryOption,
    EntityStatus, PaymentMode, PaymentStatus, TimeSlot, UserRole,
};
pub use supplier::Supplier;
pub use user::{User, UserShort};
