//! Wire DTOs shared with the PPR backend.
//!
//! DESIGN
//! ======
//! Field names follow the backend's JSON schema (Spanish domain terms such as
//! `codigo`, `ano_ejecucion`) so serde needs no renames and payloads can be
//! compared against server logs verbatim.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Deserializer, Serialize};

use crate::state::progress::Month;

/// Nullable backend columns arrive as explicit `null`; read those as the
/// field's default, same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// USERS
// =============================================================================

/// Role assigned to a dashboard user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Planificador,
    ResponsablePpr,
    /// Any role string this client does not know.
    #[default]
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Whether the role may create, edit, or delete PPR records.
    #[must_use]
    pub fn can_manage_pprs(self) -> bool {
        matches!(self, Self::Admin | Self::Planificador)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::Planificador => "Planner",
            Self::ResponsablePpr => "PPR owner",
            Self::Unknown => "Unknown",
        }
    }
}

/// The signed-in principal, persisted next to the token under `userData`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Role,
    /// Keys written by other clients are kept as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserProfile {
    /// Name to show in page headers.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().filter(|n| !n.trim().is_empty()).unwrap_or(&self.username)
    }
}

/// Successful `POST /auth/login` body.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub username: String,
    #[serde(default)]
    pub role: Role,
}

impl LoginResponse {
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            user_id: self.user_id,
            username: self.username.clone(),
            full_name: None,
            role: self.role,
            extra: serde_json::Map::new(),
        }
    }
}

/// FastAPI error body. `detail` is a string for `HTTPException` and a list
/// of objects for request validation failures.
#[derive(Clone, Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    /// Extract a human-readable detail from a raw response body.
    #[must_use]
    pub fn detail_from(body: &str) -> Option<String> {
        let parsed: Self = serde_json::from_str(body).ok()?;
        match parsed.detail {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

// =============================================================================
// PPR
// =============================================================================

/// Lifecycle state of a PPR.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PprStatus {
    #[default]
    Activo,
    Inactivo,
    Suspendido,
}

impl PprStatus {
    pub const ALL: [Self; 3] = [Self::Activo, Self::Inactivo, Self::Suspendido];

    /// Wire code, as used in form `<select>` values.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Activo => "activo",
            Self::Inactivo => "inactivo",
            Self::Suspendido => "suspendido",
        }
    }

    #[must_use]
    pub fn from_code(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == raw.trim())
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Activo => "Active",
            Self::Inactivo => "Inactive",
            Self::Suspendido => "Suspended",
        }
    }
}

/// A PPR record as returned by `/ppr/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ppr {
    pub id: i64,
    pub codigo: String,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub unidad_medida: Option<String>,
    pub responsable_planificacion_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub estado: PprStatus,
    /// ISO-8601 timestamp, passed through as sent by the server.
    #[serde(default)]
    pub fecha_inicio: Option<String>,
    #[serde(default)]
    pub fecha_fin: Option<String>,
    pub ano_ejecucion: i32,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// `POST /ppr/` payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PprCreate {
    pub codigo: String,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub unidad_medida: Option<String>,
    pub responsable_planificacion_id: i64,
    pub estado: PprStatus,
    pub fecha_inicio: Option<String>,
    pub fecha_fin: Option<String>,
    pub ano_ejecucion: i32,
    pub responsable_ppr_ids: Vec<i64>,
}

/// Client-side validation failures for PPR forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PprValidationError {
    #[error("PPR code is required")]
    MissingCodigo,
    #[error("PPR name is required")]
    MissingNombre,
}

impl PprCreate {
    /// Check required fields before sending.
    ///
    /// # Errors
    ///
    /// Returns the first blank required field.
    pub fn validate(&self) -> Result<(), PprValidationError> {
        if self.codigo.trim().is_empty() {
            return Err(PprValidationError::MissingCodigo);
        }
        if self.nombre.trim().is_empty() {
            return Err(PprValidationError::MissingNombre);
        }
        Ok(())
    }
}

/// `PUT /ppr/{id}` payload. Unset fields are omitted so the server leaves
/// them untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PprUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unidad_medida: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsable_planificacion_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<PprStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_inicio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_fin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ano_ejecucion: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsable_ppr_ids: Option<Vec<i64>>,
}

/// Query filters for `GET /ppr/`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PprFilter {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub ano_ejecucion: Option<i32>,
}

impl PprFilter {
    /// Encoded query string without the leading `?`; empty when no filter is set.
    #[must_use]
    pub fn query_string(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(skip) = self.skip {
            query.append_pair("skip", &skip.to_string());
        }
        if let Some(limit) = self.limit {
            query.append_pair("limit", &limit.to_string());
        }
        if let Some(year) = self.ano_ejecucion {
            query.append_pair("ano_ejecucion", &year.to_string());
        }
        query.finish()
    }
}

// =============================================================================
// METAS (annual targets)
// =============================================================================

/// Annual target with a programmed value per month.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PprMetaFields {
    pub ppr_id: i64,
    pub ano_ejecucion: i32,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta_programada_anual: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ene_prog: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub feb_prog: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mar_prog: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub abr_prog: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub may_prog: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub jun_prog: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub jul_prog: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ago_prog: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sep_prog: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub oct_prog: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nov_prog: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dic_prog: f64,
}

impl PprMetaFields {
    /// Programmed value for `month`.
    #[must_use]
    pub fn programmed(&self, month: Month) -> f64 {
        match month {
            Month::Ene => self.ene_prog,
            Month::Feb => self.feb_prog,
            Month::Mar => self.mar_prog,
            Month::Abr => self.abr_prog,
            Month::May => self.may_prog,
            Month::Jun => self.jun_prog,
            Month::Jul => self.jul_prog,
            Month::Ago => self.ago_prog,
            Month::Sep => self.sep_prog,
            Month::Oct => self.oct_prog,
            Month::Nov => self.nov_prog,
            Month::Dic => self.dic_prog,
        }
    }

    /// Sum of the twelve monthly values.
    #[must_use]
    pub fn monthly_total(&self) -> f64 {
        Month::ALL.iter().map(|m| self.programmed(*m)).sum()
    }
}

/// A stored meta as returned by `/ppr/{id}/metas`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PprMeta {
    pub id: i64,
    #[serde(flatten)]
    pub fields: PprMetaFields,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

// =============================================================================
// AVANCES (monthly progress)
// =============================================================================

/// One month of reported progress.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PprAvanceFields {
    pub ppr_id: i64,
    pub ano_ejecucion: i32,
    pub mes: Month,
    #[serde(default, deserialize_with = "null_as_default")]
    pub valor_ejecutado: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub valor_programado: f64,
    #[serde(default)]
    pub comentario: Option<String>,
    /// Row carries a year-to-date total rather than a single month.
    #[serde(default, deserialize_with = "null_as_default")]
    pub acumulado_anual: bool,
}

/// A stored avance as returned by `/ppr/{id}/avances`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PprAvance {
    pub id: i64,
    #[serde(flatten)]
    pub fields: PprAvanceFields,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}
