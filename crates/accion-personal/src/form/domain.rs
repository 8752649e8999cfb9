use serde::{Deserialize, Serialize};

/// Enumerated category of a personnel request, carrying its Spanish wire label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestReason {
    #[serde(rename = "Vacaciones")]
    Vacation,
    #[serde(rename = "Permiso")]
    Leave,
    #[serde(rename = "Incapacidad")]
    MedicalLeave,
    #[serde(rename = "Renuncia")]
    Resignation,
    #[serde(rename = "Duelo/Matrimonio/Nacimiento")]
    BereavementMarriageBirth,
    #[serde(rename = "Pre-aprobado")]
    PreApproved,
    #[serde(rename = "Home Office")]
    HomeOffice,
    #[serde(rename = "Consulta Médica - Emergencia")]
    MedicalConsult,
    #[serde(rename = "Otras Solicitudes de Colaborador")]
    OtherEmployee,
    #[serde(rename = "Otras Solicitudes de Jefatura")]
    OtherManagement,
    #[serde(rename = "Goce de dias libres compensatorios")]
    CompensatoryDays,
}

impl RequestReason {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vacation => "Vacaciones",
            Self::Leave => "Permiso",
            Self::MedicalLeave => "Incapacidad",
            Self::Resignation => "Renuncia",
            Self::BereavementMarriageBirth => "Duelo/Matrimonio/Nacimiento",
            Self::PreApproved => "Pre-aprobado",
            Self::HomeOffice => "Home Office",
            Self::MedicalConsult => "Consulta Médica - Emergencia",
            Self::OtherEmployee => "Otras Solicitudes de Colaborador",
            Self::OtherManagement => "Otras Solicitudes de Jefatura",
            Self::CompensatoryDays => "Goce de dias libres compensatorios",
        }
    }

    pub const fn ordered() -> [Self; 11] {
        [
            Self::Vacation,
            Self::Leave,
            Self::MedicalLeave,
            Self::Resignation,
            Self::BereavementMarriageBirth,
            Self::PreApproved,
            Self::HomeOffice,
            Self::MedicalConsult,
            Self::OtherEmployee,
            Self::OtherManagement,
            Self::CompensatoryDays,
        ]
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|reason| reason.label() == label)
    }

    /// Reasons whose date range is collected regardless of any sub-type.
    pub const fn requires_date_range(self) -> bool {
        matches!(
            self,
            Self::Leave
                | Self::MedicalLeave
                | Self::HomeOffice
                | Self::CompensatoryDays
                | Self::BereavementMarriageBirth
        )
    }

    /// Hourly leave also collects a start and end time.
    pub const fn requires_time_range(self) -> bool {
        matches!(self, Self::Leave)
    }

    /// Reasons that must carry an evidence attachment before submission.
    pub const fn requires_evidence(self) -> bool {
        matches!(
            self,
            Self::Leave
                | Self::MedicalLeave
                | Self::Resignation
                | Self::BereavementMarriageBirth
                | Self::PreApproved
        )
    }
}

/// Sub-classification of a vacation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VacationType {
    #[serde(rename = "vacaciones-dias")]
    DaysOnly,
    #[serde(rename = "pago-prima-vacacional")]
    PaymentOnly,
    #[serde(rename = "ambos")]
    Both,
}

impl VacationType {
    pub const fn wire_value(self) -> &'static str {
        match self {
            Self::DaysOnly => "vacaciones-dias",
            Self::PaymentOnly => "pago-prima-vacacional",
            Self::Both => "ambos",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        [Self::DaysOnly, Self::PaymentOnly, Self::Both]
            .into_iter()
            .find(|kind| kind.wire_value() == value)
    }

    pub const fn includes_days(self) -> bool {
        matches!(self, Self::DaysOnly | Self::Both)
    }

    pub const fn includes_payment(self) -> bool {
        matches!(self, Self::PaymentOnly | Self::Both)
    }
}

/// Evidence file captured alongside a request, already read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Country derivation from the employee email.
///
/// Raw substring containment is the observed upstream behavior: `.sv` wins
/// over `.gt`, and an address such as `user@any.svx.com` still maps to
/// El Salvador. Kept as-is rather than tightened to a domain-suffix match.
pub fn country_for_email(email: &str) -> &'static str {
    let lowered = email.to_lowercase();
    if lowered.contains(".sv") {
        "El Salvador"
    } else if lowered.contains(".gt") {
        "Guatemala"
    } else {
        ""
    }
}
