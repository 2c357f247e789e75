//! Monthly progress for one PPR, selected through the query string
//! (`?codigo=PPR-001&id=4`).
//!
//! SYSTEM CONTEXT
//! ==============
//! Guarded route reached from the PPR list. The PPR is resolved by `id` when
//! present, otherwise by `codigo` against the list endpoint. Editing a
//! month's executed value records a new avance for that month; the latest
//! avance per month is what the table shows.

#[cfg(test)]
#[path = "ppr_progress_test.rs"]
mod ppr_progress_test;

use leptos::prelude::*;

use crate::components::nav_bar::NavBar;
use crate::components::notice_banner::{NoticeBanner, notify, notify_api_error};
use crate::components::series_chart::SeriesChart;
use crate::config::Page;
use crate::net::api::{self, ApiError};
use crate::net::types::{Ppr, PprAvanceFields, PprFilter};
use crate::session::SessionContext;
use crate::state::notice::{NoticeKind, NoticeState};
use crate::state::progress::{
    ChartSeries, MonthlyProgress, monthly_from_avances, monthly_percentage, overall_percentage, programmed_vs_executed,
};
use crate::util::auth::install_page_guard;
use crate::util::browser::{location_query, query_param};

/// Which PPR the page was opened for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressQuery {
    pub id: Option<i64>,
    pub codigo: Option<String>,
}

impl ProgressQuery {
    /// `None` when neither `id` nor `codigo` is usable.
    #[must_use]
    pub fn parse(query: &str) -> Option<Self> {
        let id = query_param(query, "id").and_then(|raw| raw.trim().parse().ok());
        let codigo = query_param(query, "codigo").map(|c| c.trim().to_owned()).filter(|c| !c.is_empty());
        (id.is_some() || codigo.is_some()).then_some(Self { id, codigo })
    }
}

/// Failures while loading the page data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("PPR {0} was not found")]
    NotFound(String),
}

/// A PPR with its months folded from avances.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressView {
    pub ppr: Ppr,
    pub rows: Vec<MonthlyProgress>,
}

impl ProgressView {
    #[must_use]
    pub fn overall(&self) -> u32 {
        overall_percentage(&self.rows)
    }

    #[must_use]
    pub fn charts(&self) -> (ChartSeries, ChartSeries) {
        (monthly_percentage(&self.rows), programmed_vs_executed(&self.rows))
    }
}

async fn resolve_ppr(session: &SessionContext, query: &ProgressQuery) -> Result<Ppr, ProgressError> {
    if let Some(id) = query.id {
        return Ok(api::get_ppr(session, id).await?);
    }
    let codigo = query.codigo.clone().unwrap_or_default();
    api::list_pprs(session, &PprFilter::default())
        .await?
        .into_iter()
        .find(|p| p.codigo == codigo)
        .ok_or(ProgressError::NotFound(codigo))
}

async fn load_progress(session: &SessionContext, query: &ProgressQuery) -> Result<ProgressView, ProgressError> {
    let ppr = resolve_ppr(session, query).await?;
    let avances = api::list_avances(session, ppr.id).await?;
    Ok(ProgressView { rows: monthly_from_avances(&avances), ppr })
}

/// Parse a typed executed value; accepts `8,5` as well as `8.5`.
#[must_use]
pub fn parse_executed_input(raw: &str) -> Option<f64> {
    raw.trim().replace(',', ".").parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}

/// Avance recording a new executed value for an existing month row.
#[must_use]
pub fn edited_avance(ppr: &Ppr, row: &MonthlyProgress, executed: f64) -> PprAvanceFields {
    PprAvanceFields {
        ppr_id: ppr.id,
        ano_ejecucion: ppr.ano_ejecucion,
        mes: row.month,
        valor_ejecutado: executed,
        valor_programado: row.programmed,
        comentario: row.comment.clone(),
        acumulado_anual: false,
    }
}

#[component]
pub fn PprProgressPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    if !install_page_guard(&session, Page::PprProgress).allowed() {
        return view! { <p class="page-redirect">"Redirecting to login..."</p> }.into_any();
    }

    let Some(query) = ProgressQuery::parse(&location_query()) else {
        return view! {
            <NoticeBanner/>
            <div class="progress-page">
                <NavBar active=Page::Ppr/>
                <p class="progress-page__error">"No PPR selected. Open one from the PPR list."</p>
            </div>
        }
        .into_any();
    };

    let can_edit = session.profile().is_some_and(|p| p.role.can_manage_pprs());
    let refresh = RwSignal::new(0_u32);
    let load_session = session.clone();
    let progress = LocalResource::new(move || {
        refresh.track();
        let session = load_session.clone();
        let query = query.clone();
        async move {
            match load_progress(&session, &query).await {
                Ok(data) => Some(data),
                Err(ProgressError::Api(err)) => {
                    notify_api_error(notices, &err);
                    None
                }
                Err(err) => {
                    notify(notices, NoticeKind::Error, err.to_string());
                    None
                }
            }
        }
    });

    let edit_session = session.clone();
    let on_edit = Callback::new(move |(ppr, row, raw): (Ppr, MonthlyProgress, String)| {
        let Some(executed) = parse_executed_input(&raw) else {
            notify(notices, NoticeKind::Error, "Enter a non-negative number.");
            return;
        };
        let payload = edited_avance(&ppr, &row, executed);
        let session = edit_session.clone();
        leptos::task::spawn_local(async move {
            match api::create_avance(&session, ppr.id, &payload).await {
                Ok(_) => {
                    notify(notices, NoticeKind::Success, format!("Progress for {} updated", row.month.label()));
                    refresh.update(|n| *n += 1);
                }
                Err(err) => notify_api_error(notices, &err),
            }
        });
    });

    view! {
        <NoticeBanner/>
        <div class="progress-page">
            <NavBar active=Page::Ppr/>
            <Suspense fallback=move || view! { <p>"Loading progress..."</p> }>
                {move || {
                    progress
                        .get()
                        .map(|loaded| match loaded {
                            Some(data) => render_progress(data, can_edit, on_edit).into_any(),
                            None => view! { <p class="progress-page__error">"Progress unavailable."</p> }.into_any(),
                        })
                }}
            </Suspense>
        </div>
    }
    .into_any()
}

fn render_progress(
    data: ProgressView,
    can_edit: bool,
    on_edit: Callback<(Ppr, MonthlyProgress, String)>,
) -> impl IntoView {
    let (percent_chart, comparison_chart) = data.charts();
    let overall = data.overall();
    let ppr = data.ppr;
    let rows = data
        .rows
        .into_iter()
        .map(|row| {
            let draft = RwSignal::new(row.executed.to_string());
            let status = row.status();
            let executed = row.executed;
            let month = row.month.label();
            let programmed = row.programmed;
            let percentage = format!("{}%", row.percentage());
            let comment = row.comment.clone().unwrap_or_default();
            let row_ppr = ppr.clone();
            let save = move |_| on_edit.run((row_ppr.clone(), row.clone(), draft.get()));
            view! {
                <tr>
                    <td>{month}</td>
                    <td>{programmed}</td>
                    <td>
                        <Show when=move || can_edit fallback=move || executed>
                            <input
                                class="progress-table__input"
                                type="text"
                                prop:value=move || draft.get()
                                on:input=move |ev| draft.set(event_target_value(&ev))
                            />
                        </Show>
                    </td>
                    <td>{percentage}</td>
                    <td><span class=status.css_class()>{status.label()}</span></td>
                    <td>{comment}</td>
                    <td>
                        <Show when=move || can_edit>
                            <button class="btn btn--small" title="Save" on:click=save.clone()>
                                "Save"
                            </button>
                        </Show>
                    </td>
                </tr>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <section class="progress-page__info">
            <h1>{format!("{} ({})", ppr.nombre, ppr.codigo)}</h1>
            <p>{ppr.descripcion.clone().unwrap_or_default()}</p>
            <p class="progress-page__overall">{format!("Overall progress: {overall}%")}</p>
        </section>
        <div class="progress-page__charts">
            <SeriesChart series=Signal::derive(move || percent_chart.clone())/>
            <SeriesChart series=Signal::derive(move || comparison_chart.clone())/>
        </div>
        <table class="progress-table">
            <thead>
                <tr>
                    <th>"Month"</th>
                    <th>"Programmed"</th>
                    <th>"Executed"</th>
                    <th>"Progress"</th>
                    <th>"Status"</th>
                    <th>"Comment"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
}
