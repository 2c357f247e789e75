//! Monthly progress math and chart series for the progress pages.
//!
//! DESIGN
//! ======
//! Pure data in, pure data out. Pages hand the resulting [`ChartSeries`] to
//! whatever chart renderer they use; nothing here knows about drawing.

#[cfg(test)]
#[path = "progress_test.rs"]
mod progress_test;

use serde::{Deserialize, Serialize};

use crate::net::types::{PprAvance, PprMetaFields};

/// Percentage at or above which a month counts as on track.
pub const OK_THRESHOLD: u32 = 95;
/// Percentage at or above which a month counts as partially met.
pub const PARTIAL_THRESHOLD: u32 = 80;

/// Calendar month as encoded by the backend (`ene` .. `dic`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    #[default]
    Ene,
    Feb,
    Mar,
    Abr,
    May,
    Jun,
    Jul,
    Ago,
    Sep,
    Oct,
    Nov,
    Dic,
}

impl Month {
    pub const ALL: [Self; 12] = [
        Self::Ene,
        Self::Feb,
        Self::Mar,
        Self::Abr,
        Self::May,
        Self::Jun,
        Self::Jul,
        Self::Ago,
        Self::Sep,
        Self::Oct,
        Self::Nov,
        Self::Dic,
    ];

    /// Chart axis label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Ene => "Ene",
            Self::Feb => "Feb",
            Self::Mar => "Mar",
            Self::Abr => "Abr",
            Self::May => "May",
            Self::Jun => "Jun",
            Self::Jul => "Jul",
            Self::Ago => "Ago",
            Self::Sep => "Sep",
            Self::Oct => "Oct",
            Self::Nov => "Nov",
            Self::Dic => "Dic",
        }
    }

    /// Zero-based position in the year.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Badge shown next to a month's percentage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressStatus {
    Ok,
    Partial,
    Low,
}

impl ProgressStatus {
    #[must_use]
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage >= OK_THRESHOLD {
            Self::Ok
        } else if percentage >= PARTIAL_THRESHOLD {
            Self::Partial
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Partial => "Partial",
            Self::Low => "Low",
        }
    }

    /// CSS modifier for the badge.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Ok => "badge badge--ok",
            Self::Partial => "badge badge--partial",
            Self::Low => "badge badge--low",
        }
    }
}

/// Programmed vs executed values for one month.
#[derive(Clone, Debug, PartialEq)]
pub struct MonthlyProgress {
    pub month: Month,
    pub programmed: f64,
    pub executed: f64,
    pub comment: Option<String>,
}

impl MonthlyProgress {
    #[must_use]
    pub fn new(month: Month, programmed: f64, executed: f64) -> Self {
        Self { month, programmed, executed, comment: None }
    }

    /// Executed as a rounded percentage of programmed; 0 when nothing was
    /// programmed.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        percentage_of(self.executed, self.programmed)
    }

    #[must_use]
    pub fn status(&self) -> ProgressStatus {
        ProgressStatus::from_percentage(self.percentage())
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percentage_of(executed: f64, programmed: f64) -> u32 {
    if programmed > 0.0 && executed.is_finite() {
        (executed / programmed * 100.0).round().max(0.0) as u32
    } else {
        0
    }
}

/// Fold monthly avance rows into calendar order.
///
/// Year-to-date (`acumulado_anual`) rows are skipped. When a month appears
/// more than once the later row wins.
#[must_use]
pub fn monthly_from_avances(avances: &[PprAvance]) -> Vec<MonthlyProgress> {
    let mut slots: [Option<MonthlyProgress>; 12] = Default::default();
    for avance in avances.iter().filter(|a| !a.fields.acumulado_anual) {
        let f = &avance.fields;
        slots[f.mes.index()] = Some(MonthlyProgress {
            month: f.mes,
            programmed: f.valor_programado,
            executed: f.valor_ejecutado,
            comment: f.comentario.clone(),
        });
    }
    slots.into_iter().flatten().collect()
}

/// Twelve months of programmed values from a meta, with nothing executed.
#[must_use]
pub fn monthly_from_meta(meta: &PprMetaFields) -> Vec<MonthlyProgress> {
    Month::ALL.iter().map(|m| MonthlyProgress::new(*m, meta.programmed(*m), 0.0)).collect()
}

/// Overall percentage across all rows (sum executed over sum programmed).
#[must_use]
pub fn overall_percentage(rows: &[MonthlyProgress]) -> u32 {
    let programmed: f64 = rows.iter().map(|r| r.programmed).sum();
    let executed: f64 = rows.iter().map(|r| r.executed).sum();
    percentage_of(executed, programmed)
}

/// Sum several PPRs' monthly rows month by month, in calendar order.
#[must_use]
pub fn aggregate_monthly(per_ppr: &[Vec<MonthlyProgress>]) -> Vec<MonthlyProgress> {
    let mut slots: [Option<MonthlyProgress>; 12] = Default::default();
    for row in per_ppr.iter().flatten() {
        let slot = slots[row.month.index()].get_or_insert_with(|| MonthlyProgress::new(row.month, 0.0, 0.0));
        slot.programmed += row.programmed;
        slot.executed += row.executed;
    }
    slots.into_iter().flatten().collect()
}

// =============================================================================
// CHART SERIES
// =============================================================================

/// One line/bar series.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
}

/// Chart-library-neutral series: axis labels plus one or more datasets.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartSeries {
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartSeries {
    /// Largest value across every dataset, for axis scaling.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.datasets
            .iter()
            .flat_map(|d| d.data.iter().copied())
            .fold(0.0, f64::max)
    }
}

fn month_labels(rows: &[MonthlyProgress]) -> Vec<String> {
    rows.iter().map(|r| r.month.label().to_owned()).collect()
}

/// Programmed and executed values side by side.
#[must_use]
pub fn programmed_vs_executed(rows: &[MonthlyProgress]) -> ChartSeries {
    ChartSeries {
        title: "Programmed vs Executed".to_owned(),
        labels: month_labels(rows),
        datasets: vec![
            Dataset { label: "Programmed".to_owned(), data: rows.iter().map(|r| r.programmed).collect() },
            Dataset { label: "Executed".to_owned(), data: rows.iter().map(|r| r.executed).collect() },
        ],
    }
}

/// Per-month completion percentage.
#[must_use]
pub fn monthly_percentage(rows: &[MonthlyProgress]) -> ChartSeries {
    ChartSeries {
        title: "Monthly Progress".to_owned(),
        labels: month_labels(rows),
        datasets: vec![Dataset {
            label: "Progress %".to_owned(),
            data: rows.iter().map(|r| f64::from(r.percentage())).collect(),
        }],
    }
}
