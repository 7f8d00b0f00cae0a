//! Shared domain enums
//!
//! Every enum is stored as TEXT and serialized as the same label, so the
//! database rows, the JSON API and the HTML forms all agree on one spelling.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($label) {
                        return Ok($name::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($name), s))
            }
        }

        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
                let s = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
                s.parse().map_err(|e: String| e.into())
            }
        }

        impl sqlx::Encode<'_, sqlx::Postgres> for $name {
            fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
                <&str as sqlx::Encode<sqlx::Postgres>>::encode(self.as_str(), buf)
            }
        }
    };
}

text_enum! {
    /// Role of a user account
    UserRole {
        Admin => "ADMIN",
        Customer => "CUSTOMER",
    }
}

text_enum! {
    /// Whether a customer's gas connection is in service
    ConnectionStatus {
        Active => "ACTIVE",
        Inactive => "INACTIVE",
    }
}

text_enum! {
    /// Kind of gas connection held by a customer
    ConnectionType {
        Domestic => "DOMESTIC",
        Commercial => "COMMERCIAL",
    }
}

text_enum! {
    /// Supplier account status
    EntityStatus {
        Active => "ACTIVE",
        Inactive => "INACTIVE",
    }
}

text_enum! {
    /// Cylinder kind
    CylinderType {
        Domestic => "domestic",
        Commercial => "commercial",
    }
}

text_enum! {
    /// Cylinder inventory status
    CylinderStatus {
        Available => "Available",
        Booked => "Booked",
        OutOfStock => "Out of Stock",
    }
}

text_enum! {
    /// Delivery window chosen at booking time
    TimeSlot {
        Morning => "MORNING_SLOT",
        MidMorning => "MID_MORNING_SLOT",
        Afternoon => "AFTERNOON_SLOT",
        Evening => "EVENING_SLOT",
        Night => "NIGHT_SLOT",
    }
}

impl TimeSlot {
    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "07:00 AM - 10:00 AM",
            TimeSlot::MidMorning => "10:00 AM - 01:00 PM",
            TimeSlot::Afternoon => "01:00 PM - 04:00 PM",
            TimeSlot::Evening => "04:00 PM - 07:00 PM",
            TimeSlot::Night => "07:00 PM - 10:00 PM",
        }
    }
}

text_enum! {
    /// Delivery speed
    DeliveryOption {
        Standard => "STANDARD",
        Express => "EXPRESS",
        SameDay => "SAME_DAY",
        Scheduled => "SCHEDULED",
    }
}

impl DeliveryOption {
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryOption::Standard => "Standard Delivery (3-5 days)",
            DeliveryOption::Express => "Express Delivery (1-2 days)",
            DeliveryOption::SameDay => "Same-Day Delivery",
            DeliveryOption::Scheduled => "Scheduled Delivery",
        }
    }
}

text_enum! {
    PaymentMode {
        Cash => "CASH",
        Card => "CARD",
        Upi => "UPI",
        NetBanking => "NET_BANKING",
    }
}

text_enum! {
    PaymentStatus {
        Pending => "PENDING",
        Paid => "PAID",
        Failed => "FAILED",
    }
}

text_enum! {
    /// Booking lifecycle status
    BookingStatus {
        Pending => "PENDING",
        Confirmed => "CONFIRMED",
        Cancelled => "CANCELLED",
        Delivered => "DELIVERED",
    }
}
