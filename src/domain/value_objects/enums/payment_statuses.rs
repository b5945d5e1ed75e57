use std::fmt::Display;

/// Lifecycle status of a payment record.
///
/// `Pending`, `Settled` and `Cancelled` are produced locally; everything else
/// comes from the gateway. The gateway vocabulary is open-ended, so statuses
/// we do not recognize are carried verbatim in `Other` instead of being
/// rejected. Statuses travel over the wire and into storage as plain strings
/// via `parse` and `as_str`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Approved,
    Rejected,
    Settled,
    Cancelled,
    Other(String),
}

impl PaymentStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "pending" => PaymentStatus::Pending,
            "approved" => PaymentStatus::Approved,
            "rejected" => PaymentStatus::Rejected,
            "settled" => PaymentStatus::Settled,
            "cancelled" => PaymentStatus::Cancelled,
            other => PaymentStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Approved => "approved",
            PaymentStatus::Rejected => "rejected",
            PaymentStatus::Settled => "settled",
            PaymentStatus::Cancelled => "cancelled",
            PaymentStatus::Other(raw) => raw,
        }
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_round_trip() {
        for raw in ["pending", "approved", "rejected", "settled", "cancelled"] {
            assert_eq!(PaymentStatus::parse(raw).as_str(), raw);
        }
    }

    #[test]
    fn unknown_statuses_pass_through_verbatim() {
        let status = PaymentStatus::parse("in_mediation");
        assert_eq!(status, PaymentStatus::Other("in_mediation".to_string()));
        assert_eq!(status.as_str(), "in_mediation");
        assert_eq!(status.to_string(), "in_mediation");
    }

}
