use serde_json::json;

use super::*;
use crate::net::types::Role;
use crate::state::progress::Month;
use crate::test_helpers::{harness, live_token, profile};

fn ppr(id: i64, estado: &str) -> serde_json::Value {
    json!({
        "id": id,
        "codigo": format!("PPR-{id:03}"),
        "nombre": "Programa",
        "responsable_planificacion_id": 1,
        "estado": estado,
        "ano_ejecucion": 2023
    })
}

#[test]
fn counts_by_status() {
    let pprs: Vec<Ppr> = serde_json::from_value(json!([ppr(1, "activo"), ppr(2, "activo"), ppr(3, "suspendido")])).unwrap();
    let counts = StatusCounts::from_pprs(&pprs);
    assert_eq!(counts, StatusCounts { activo: 2, inactivo: 0, suspendido: 1 });
    assert_eq!(counts.total(), 3);
}

#[tokio::test]
async fn summary_combines_every_ppr() {
    let h = harness();
    h.session.start_session(&live_token(), &profile("ana", Role::Admin));
    h.transport.push_json(200, &json!([ppr(1, "activo"), ppr(2, "inactivo")]));
    h.transport.push_json(
        200,
        &json!([{ "id": 1, "ppr_id": 1, "ano_ejecucion": 2023, "mes": "ene", "valor_ejecutado": 8.0, "valor_programado": 10.0 }]),
    );
    h.transport.push_json(
        200,
        &json!([{ "id": 2, "ppr_id": 2, "ano_ejecucion": 2023, "mes": "ene", "valor_ejecutado": 2.0, "valor_programado": 10.0 }]),
    );

    let summary = load_summary(&h.session, 2023).await.unwrap();

    assert_eq!(summary.counts.total(), 2);
    assert_eq!(summary.monthly, vec![MonthlyProgress::new(Month::Ene, 20.0, 10.0)]);
    assert_eq!(summary.overall(), 50);
    assert_eq!(h.transport.requests()[0].url, "/ppr/?ano_ejecucion=2023");
}

#[tokio::test]
async fn summary_stops_on_session_loss() {
    let h = harness();
    h.session.start_session(&live_token(), &profile("ana", Role::Admin));
    h.transport.push_json(401, &json!({ "detail": "expired" }));
    let err = load_summary(&h.session, 2023).await.unwrap_err();
    assert_eq!(err, ApiError::SessionExpired);
    assert_eq!(h.transport.call_count(), 1);
}
