use super::domain::{RequestReason, VacationType};

/// Set of form fields wiped by a reason or vacation-type transition.
///
/// The clearing rules live here as an explicit transition table so they can
/// be exercised without any HTTP or UI wiring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearedFields {
    pub vacation_type: bool,
    pub start_date: bool,
    pub end_date: bool,
    pub payment_date: bool,
}

impl ClearedFields {
    pub const NONE: Self = Self {
        vacation_type: false,
        start_date: false,
        end_date: false,
        payment_date: false,
    };

    const VACATION_EXIT: Self = Self {
        vacation_type: true,
        start_date: true,
        end_date: true,
        payment_date: true,
    };

    const DATE_RANGE: Self = Self {
        vacation_type: false,
        start_date: true,
        end_date: true,
        payment_date: false,
    };

    const PAYMENT: Self = Self {
        vacation_type: false,
        start_date: false,
        end_date: false,
        payment_date: true,
    };
}

/// Fields to clear when `reason` moves from `previous` to `next`.
pub fn on_reason_change(
    previous: Option<RequestReason>,
    next: Option<RequestReason>,
) -> ClearedFields {
    match (previous, next) {
        (_, Some(RequestReason::Vacation)) => ClearedFields::NONE,
        // Any transition landing outside the vacation variant drops its
        // sub-classification and the vacation-specific dates.
        (_, _) => ClearedFields::VACATION_EXIT,
    }
}

/// Fields to clear when the vacation sub-type changes to `next`.
pub fn on_vacation_type_change(next: Option<VacationType>) -> ClearedFields {
    match next {
        Some(VacationType::PaymentOnly) => ClearedFields::DATE_RANGE,
        Some(VacationType::DaysOnly) => ClearedFields::PAYMENT,
        Some(VacationType::Both) | None => ClearedFields::NONE,
    }
}
