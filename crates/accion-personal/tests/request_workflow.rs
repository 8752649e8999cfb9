use accion_personal::directory::{project_supervisors, unwrap_roster, RosterShape, Supervisor};
use accion_personal::form::{FormSession, RequestReason, SessionError, VacationType};
use accion_personal::submission::{SubmissionOutcome, SubmissionPayload};
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::json;

fn roster_from_backend() -> Vec<Supervisor> {
    let (shape, records) = unwrap_roster(json!({
        "data": [
            { "name": "Ana Torres", "email": "ana.torres@red.com.sv", "position": "Gerente de Ventas" },
            { "name": "Bruno Díaz", "email": "bruno.diaz@red.com.sv", "position": "Analista Senior" },
            { "name": "Nombre no disponible", "email": "ghost@red.com.sv", "position": "Jefe de Área" },
        ]
    }));
    assert_eq!(shape, RosterShape::Data);
    project_supervisors(records)
}

#[test]
fn roster_projection_keeps_only_usable_supervisors() {
    let roster = roster_from_backend();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].display_name, "Ana Torres - Gerente de Ventas");
    assert_eq!(roster[0].email, "ana.torres@red.com.sv");
}

#[test]
fn medical_leave_flow_derives_day_count_and_submits() {
    let mut session = FormSession::new(roster_from_backend());

    session.form_mut().set_email(" medico@red.com.sv ");
    assert_eq!(session.form().country(), "El Salvador");

    session.select_supervisor("Ana Torres - Gerente de Ventas");
    assert_eq!(session.form().boss_email(), "ana.torres@red.com.sv");

    session
        .form_mut()
        .set_reason(Some(RequestReason::MedicalLeave));
    session
        .form_mut()
        .set_start_date(NaiveDate::from_ymd_opt(2024, 1, 1));
    session
        .form_mut()
        .set_end_date(NaiveDate::from_ymd_opt(2024, 1, 5));
    assert_eq!(session.form().incapacity_days(), "5");

    session.form_mut().set_comments("Reposo por gripe");
    session.form_mut().set_attachment(Some(
        accion_personal::form::Attachment::new("constancia.pdf", b"pdf".to_vec()),
    ));
    assert!(session.form().is_ready_to_submit());

    let now = Utc.with_ymd_and_hms(2024, 1, 6, 9, 0, 0).unwrap();
    let payload = session.begin_submission(now).expect("form is ready");
    assert_eq!(payload.reason, "Incapacidad");
    assert_eq!(payload.incapacity_days, "5");
    assert_eq!(payload.submitted_at, "2024-01-06T09:00:00.000Z");

    // A second attempt while the first is in flight is blocked.
    assert_eq!(
        session.begin_submission(now).expect_err("overlap blocked"),
        SessionError::AlreadyInFlight
    );

    session.finish_submission(&SubmissionOutcome::Success);
    assert_eq!(session.form().email(), "");
    assert!(!session.is_in_flight());
}

#[test]
fn vacation_payment_flow_forces_the_payment_convention() {
    let mut session = FormSession::new(roster_from_backend());
    session.form_mut().set_email("empleada@red.com.gt");
    assert_eq!(session.form().country(), "Guatemala");

    session.select_supervisor("Ana Torres - Gerente de Ventas");
    session.form_mut().set_reason(Some(RequestReason::Vacation));
    session
        .form_mut()
        .set_vacation_type(Some(VacationType::PaymentOnly));
    session.form_mut().set_comments("Pago de prima");
    session.form_mut().set_payment_date("2024-07-15");

    // Payment-only needs no date range.
    assert!(session.form().is_ready_to_submit());

    let now = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
    let payload: SubmissionPayload = session.begin_submission(now).expect("form is ready");
    assert_eq!(payload.payment_date, "30");
    assert_eq!(payload.vacation_type, "pago-prima-vacacional");
    assert_eq!(payload.start_date, "");
    assert_eq!(payload.end_date, "");
}

#[test]
fn switching_away_from_vacation_requires_new_fields() {
    let mut session = FormSession::new(roster_from_backend());
    session.form_mut().set_email("empleada@red.com.sv");
    session.select_supervisor("Ana Torres - Gerente de Ventas");
    session.form_mut().set_reason(Some(RequestReason::Vacation));
    session
        .form_mut()
        .set_vacation_type(Some(VacationType::Both));
    session
        .form_mut()
        .set_start_date(NaiveDate::from_ymd_opt(2024, 3, 4));
    session
        .form_mut()
        .set_end_date(NaiveDate::from_ymd_opt(2024, 3, 8));
    session.form_mut().set_comments("Cambio de planes");

    session.form_mut().set_reason(Some(RequestReason::HomeOffice));
    // The vacation dates were cleared by the transition, so the home-office
    // range must be entered again.
    assert!(!session.form().is_ready_to_submit());

    session
        .form_mut()
        .set_start_date(NaiveDate::from_ymd_opt(2024, 3, 11));
    session
        .form_mut()
        .set_end_date(NaiveDate::from_ymd_opt(2024, 3, 12));
    assert!(session.form().is_ready_to_submit());
}
