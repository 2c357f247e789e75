//! Dashboard page: PPR status summary and the year's programmed vs executed
//! totals across every PPR.
//!
//! SYSTEM CONTEXT
//! ==============
//! Authenticated landing route after login. Data is loaded once on mount:
//! the PPR list for the current year, then each PPR's avances in turn.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::components::nav_bar::NavBar;
use crate::components::notice_banner::{NoticeBanner, notify_api_error};
use crate::components::series_chart::SeriesChart;
use crate::config::Page;
use crate::net::api::{self, ApiError};
use crate::net::types::{Ppr, PprFilter, PprStatus};
use crate::session::SessionContext;
use crate::state::notice::NoticeState;
use crate::state::progress::{
    ChartSeries, MonthlyProgress, aggregate_monthly, monthly_from_avances, overall_percentage, programmed_vs_executed,
};
use crate::util::auth::install_page_guard;

/// PPR counts per lifecycle state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub activo: usize,
    pub inactivo: usize,
    pub suspendido: usize,
}

impl StatusCounts {
    #[must_use]
    pub fn from_pprs(pprs: &[Ppr]) -> Self {
        pprs.iter().fold(Self::default(), |mut acc, p| {
            match p.estado {
                PprStatus::Activo => acc.activo += 1,
                PprStatus::Inactivo => acc.inactivo += 1,
                PprStatus::Suspendido => acc.suspendido += 1,
            }
            acc
        })
    }

    #[must_use]
    pub fn total(self) -> usize {
        self.activo + self.inactivo + self.suspendido
    }
}

/// Everything the dashboard renders.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardSummary {
    pub counts: StatusCounts,
    pub monthly: Vec<MonthlyProgress>,
}

impl DashboardSummary {
    #[must_use]
    pub fn overall(&self) -> u32 {
        overall_percentage(&self.monthly)
    }

    #[must_use]
    pub fn series(&self) -> ChartSeries {
        programmed_vs_executed(&self.monthly)
    }
}

async fn load_summary(session: &SessionContext, year: i32) -> Result<DashboardSummary, ApiError> {
    let filter = PprFilter { ano_ejecucion: Some(year), ..PprFilter::default() };
    let pprs = api::list_pprs(session, &filter).await?;
    let mut per_ppr = Vec::with_capacity(pprs.len());
    for ppr in &pprs {
        per_ppr.push(monthly_from_avances(&api::list_avances(session, ppr.id).await?));
    }
    Ok(DashboardSummary { counts: StatusCounts::from_pprs(&pprs), monthly: aggregate_monthly(&per_ppr) })
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    if !install_page_guard(&session, Page::Dashboard).allowed() {
        return view! { <p class="page-redirect">"Redirecting to login..."</p> }.into_any();
    }

    let year = session.current_year();
    let summary = LocalResource::new(move || {
        let session = session.clone();
        async move {
            match load_summary(&session, year).await {
                Ok(summary) => Some(summary),
                Err(err) => {
                    notify_api_error(notices, &err);
                    None
                }
            }
        }
    });

    view! {
        <NoticeBanner/>
        <div class="dashboard-page">
            <NavBar active=Page::Dashboard/>
            <h1 class="dashboard-page__title">{format!("Execution {year}")}</h1>
            <Suspense fallback=move || view! { <p>"Loading dashboard..."</p> }>
                {move || {
                    summary
                        .get()
                        .map(|loaded| match loaded {
                            Some(s) => render_summary(s).into_any(),
                            None => view! { <p class="dashboard-page__error">"Dashboard data unavailable."</p> }.into_any(),
                        })
                }}
            </Suspense>
        </div>
    }
    .into_any()
}

fn render_summary(summary: DashboardSummary) -> impl IntoView {
    let counts = summary.counts;
    let overall = summary.overall();
    let series = summary.series();
    view! {
        <div class="dashboard-page__cards">
            <div class="stat-card"><span class="stat-card__value">{counts.total()}</span>" PPRs"</div>
            <div class="stat-card"><span class="stat-card__value">{counts.activo}</span>" active"</div>
            <div class="stat-card"><span class="stat-card__value">{counts.suspendido}</span>" suspended"</div>
            <div class="stat-card"><span class="stat-card__value">{format!("{overall}%")}</span>" executed"</div>
        </div>
        <SeriesChart series=Signal::derive(move || series.clone())/>
    }
}
