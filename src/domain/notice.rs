use std::fmt;

/// A transient, fire-and-forget message for the customer or staff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    ItemAdded { name: String },
    OrderSubmitted,
    SubmissionFailed,
    ValidationFailed { message: String },
    LocationError { message: String },
}

impl Notice {
    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::ItemAdded { .. } | Notice::OrderSubmitted)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::ItemAdded { name } => write!(f, "{name} added to your order"),
            Notice::OrderSubmitted => f.write_str("Order sent successfully!"),
            Notice::SubmissionFailed => f.write_str("Could not send the order"),
            Notice::ValidationFailed { message } => f.write_str(message),
            Notice::LocationError { message } => f.write_str(message),
        }
    }
}
