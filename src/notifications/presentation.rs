use crate::orders::DeliveryStatus;

/// Cosmetic treatment of a delivery status in customer emails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPresentation {
    /// Emoji shown next to the headline.
    pub icon: &'static str,

    /// Accent colour, as a CSS hex value.
    pub color: &'static str,

    /// Short headline.
    pub headline: &'static str,

    /// One-sentence explanation for the customer.
    pub message: &'static str,
}

impl StatusPresentation {
    /// Presentation for `status`.
    pub fn for_status(status: DeliveryStatus) -> Self {
        match status {
            DeliveryStatus::Pending => Self {
                icon: "⏳",
                color: "#f59e0b",
                headline: "Order received",
                message: "We have received your order and will start preparing it shortly.",
            },
            DeliveryStatus::Packed => Self {
                icon: "📦",
                color: "#3b82f6",
                headline: "Order packed",
                message: "Your meal kit has been packed and is ready for dispatch.",
            },
            DeliveryStatus::InTransit => Self {
                icon: "🚚",
                color: "#8b5cf6",
                headline: "On the way",
                message: "Your meal kit is on its way to you.",
            },
            DeliveryStatus::Delivered => Self {
                icon: "✅",
                color: "#10b981",
                headline: "Delivered",
                message: "Your meal kit has been delivered. Enjoy your cooking!",
            },
            DeliveryStatus::Failed => Self {
                icon: "⚠️",
                color: "#ef4444",
                headline: "Delivery issue",
                message: "We could not complete your delivery. Our team will contact you shortly.",
            },
        }
    }
}
