use serde_json::json;

use super::*;
use crate::net::types::Role;
use crate::state::progress::Month;
use crate::test_helpers::{harness, live_token, profile};

fn ppr_json(id: i64, codigo: &str) -> serde_json::Value {
    json!({
        "id": id,
        "codigo": codigo,
        "nombre": "Programa",
        "responsable_planificacion_id": 1,
        "ano_ejecucion": 2024
    })
}

fn avances_json() -> serde_json::Value {
    json!([
        { "id": 1, "ppr_id": 4, "ano_ejecucion": 2024, "mes": "feb", "valor_ejecutado": 18.0, "valor_programado": 20.0 },
        { "id": 2, "ppr_id": 4, "ano_ejecucion": 2024, "mes": "ene", "valor_ejecutado": 8.5, "valor_programado": 10.0 }
    ])
}

// =============================================================================
// query
// =============================================================================

#[test]
fn query_with_code_and_id() {
    let q = ProgressQuery::parse("codigo=PPR-001&id=4").unwrap();
    assert_eq!(q, ProgressQuery { id: Some(4), codigo: Some("PPR-001".into()) });
}

#[test]
fn query_with_only_code() {
    let q = ProgressQuery::parse("?codigo=PPR+001").unwrap();
    assert_eq!(q.id, None);
    assert_eq!(q.codigo.as_deref(), Some("PPR 001"));
}

#[test]
fn query_ignores_non_numeric_id() {
    let q = ProgressQuery::parse("id=abc&codigo=X").unwrap();
    assert_eq!(q.id, None);
    assert!(ProgressQuery::parse("id=abc").is_none());
}

#[test]
fn empty_query_selects_nothing() {
    assert!(ProgressQuery::parse("").is_none());
    assert!(ProgressQuery::parse("codigo=").is_none());
}

// =============================================================================
// editing
// =============================================================================

#[test]
fn executed_input_accepts_comma_decimal() {
    assert_eq!(parse_executed_input("8,5"), Some(8.5));
    assert_eq!(parse_executed_input(" 12 "), Some(12.0));
}

#[test]
fn executed_input_rejects_negative_and_garbage() {
    assert_eq!(parse_executed_input("-1"), None);
    assert_eq!(parse_executed_input("abc"), None);
    assert_eq!(parse_executed_input("NaN"), None);
    assert_eq!(parse_executed_input(""), None);
}

#[test]
fn edited_avance_keeps_programmed_and_comment() {
    let ppr: Ppr = serde_json::from_value(ppr_json(4, "PPR-004")).unwrap();
    let mut row = MonthlyProgress::new(Month::Mar, 30.0, 25.0);
    row.comment = Some("retraso".into());
    let avance = edited_avance(&ppr, &row, 29.0);
    assert_eq!(avance.ppr_id, 4);
    assert_eq!(avance.ano_ejecucion, 2024);
    assert_eq!(avance.mes, Month::Mar);
    assert_eq!(avance.valor_ejecutado, 29.0);
    assert_eq!(avance.valor_programado, 30.0);
    assert_eq!(avance.comentario.as_deref(), Some("retraso"));
}

// =============================================================================
// loading
// =============================================================================

#[tokio::test]
async fn load_by_id_uses_detail_endpoint() {
    let h = harness();
    h.session.start_session(&live_token(), &profile("ana", Role::Planificador));
    h.transport.push_json(200, &ppr_json(4, "PPR-004"));
    h.transport.push_json(200, &avances_json());

    let query = ProgressQuery { id: Some(4), codigo: Some("PPR-004".into()) };
    let view = load_progress(&h.session, &query).await.unwrap();

    assert_eq!(view.ppr.id, 4);
    assert_eq!(view.rows.iter().map(|r| r.month).collect::<Vec<_>>(), vec![Month::Ene, Month::Feb]);
    // 26.5 / 30
    assert_eq!(view.overall(), 88);
    let urls: Vec<String> = h.transport.requests().into_iter().map(|r| r.url).collect();
    assert_eq!(urls, vec!["/ppr/4".to_owned(), "/ppr/4/avances".to_owned()]);
}

#[tokio::test]
async fn load_by_code_searches_the_list() {
    let h = harness();
    h.session.start_session(&live_token(), &profile("ana", Role::Planificador));
    h.transport.push_json(200, &json!([ppr_json(3, "PPR-003"), ppr_json(4, "PPR-004")]));
    h.transport.push_json(200, &avances_json());

    let query = ProgressQuery { id: None, codigo: Some("PPR-004".into()) };
    let view = load_progress(&h.session, &query).await.unwrap();

    assert_eq!(view.ppr.id, 4);
    assert_eq!(h.transport.requests()[1].url, "/ppr/4/avances");
}

#[tokio::test]
async fn unknown_code_is_not_found() {
    let h = harness();
    h.session.start_session(&live_token(), &profile("ana", Role::Planificador));
    h.transport.push_json(200, &json!([ppr_json(3, "PPR-003")]));

    let query = ProgressQuery { id: None, codigo: Some("PPR-999".into()) };
    let err = load_progress(&h.session, &query).await.unwrap_err();

    assert_eq!(err, ProgressError::NotFound("PPR-999".into()));
    assert_eq!(h.transport.call_count(), 1);
}

#[tokio::test]
async fn charts_follow_rows() {
    let h = harness();
    h.session.start_session(&live_token(), &profile("ana", Role::Planificador));
    h.transport.push_json(200, &ppr_json(4, "PPR-004"));
    h.transport.push_json(200, &avances_json());

    let view = load_progress(&h.session, &ProgressQuery { id: Some(4), codigo: None }).await.unwrap();
    let (percent, comparison) = view.charts();

    assert_eq!(percent.datasets[0].data, vec![85.0, 90.0]);
    assert_eq!(comparison.datasets[1].data, vec![8.5, 18.0]);
}
