//! PPR management page: list, filter by year, create, edit, delete, and
//! jump to a PPR's monthly progress.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guarded route. Mutating actions are only offered to roles that may manage
//! PPRs; the backend enforces the same rule and answers 403 otherwise.

#[cfg(test)]
#[path = "ppr_test.rs"]
mod ppr_test;

use leptos::prelude::*;

use crate::components::nav_bar::NavBar;
use crate::components::notice_banner::{NoticeBanner, notify, notify_api_error};
use crate::config::{AppConfig, Page};
use crate::net::api;
use crate::net::types::{Ppr, PprCreate, PprFilter, PprStatus, PprUpdate, PprValidationError};
use crate::session::SessionContext;
use crate::state::notice::{NoticeKind, NoticeState};
use crate::util::auth::install_page_guard;
use crate::util::browser::confirm;

// =============================================================================
// FORM MODEL
// =============================================================================

/// Raw form inputs for creating or editing a PPR.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PprForm {
    pub codigo: String,
    pub nombre: String,
    pub descripcion: String,
    pub unidad_medida: String,
    pub estado: PprStatus,
    pub ano_ejecucion: String,
}

/// Form problems caught before any request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PprFormError {
    #[error(transparent)]
    Missing(#[from] PprValidationError),

    #[error("execution year must be a number between 2000 and 2100")]
    InvalidYear,

    #[error("your profile has no user id; please sign in again")]
    NoPlanner,
}

fn optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Parse an execution year typed into the form.
#[must_use]
pub fn parse_year(raw: &str) -> Option<i32> {
    raw.trim().parse().ok().filter(|y| (2000..=2100).contains(y))
}

impl PprForm {
    /// Empty form defaulting to `year`.
    #[must_use]
    pub fn for_year(year: i32) -> Self {
        Self { ano_ejecucion: year.to_string(), ..Self::default() }
    }

    #[must_use]
    pub fn from_ppr(ppr: &Ppr) -> Self {
        Self {
            codigo: ppr.codigo.clone(),
            nombre: ppr.nombre.clone(),
            descripcion: ppr.descripcion.clone().unwrap_or_default(),
            unidad_medida: ppr.unidad_medida.clone().unwrap_or_default(),
            estado: ppr.estado,
            ano_ejecucion: ppr.ano_ejecucion.to_string(),
        }
    }

    /// Build the create payload with the signed-in user as planner.
    ///
    /// # Errors
    ///
    /// Blank code or name, an unparseable year, or no planner id.
    pub fn to_create(&self, planner_id: Option<i64>) -> Result<PprCreate, PprFormError> {
        let year = parse_year(&self.ano_ejecucion).ok_or(PprFormError::InvalidYear)?;
        let payload = PprCreate {
            codigo: self.codigo.trim().to_owned(),
            nombre: self.nombre.trim().to_owned(),
            descripcion: optional(&self.descripcion),
            unidad_medida: optional(&self.unidad_medida),
            responsable_planificacion_id: planner_id.ok_or(PprFormError::NoPlanner)?,
            estado: self.estado,
            fecha_inicio: None,
            fecha_fin: None,
            ano_ejecucion: year,
            responsable_ppr_ids: Vec::new(),
        };
        payload.validate()?;
        Ok(payload)
    }

    /// Build an update carrying only the fields that differ from `original`.
    ///
    /// # Errors
    ///
    /// Blank name or an unparseable year.
    pub fn to_update(&self, original: &Ppr) -> Result<PprUpdate, PprFormError> {
        let nombre = self.nombre.trim();
        if nombre.is_empty() {
            return Err(PprValidationError::MissingNombre.into());
        }
        let year = parse_year(&self.ano_ejecucion).ok_or(PprFormError::InvalidYear)?;
        let descripcion = optional(&self.descripcion);
        let unidad_medida = optional(&self.unidad_medida);
        Ok(PprUpdate {
            nombre: (nombre != original.nombre).then(|| nombre.to_owned()),
            descripcion: (descripcion != original.descripcion).then(|| descripcion.unwrap_or_default()),
            unidad_medida: (unidad_medida != original.unidad_medida).then(|| unidad_medida.unwrap_or_default()),
            estado: (self.estado != original.estado).then_some(self.estado),
            ano_ejecucion: (year != original.ano_ejecucion).then_some(year),
            ..PprUpdate::default()
        })
    }
}

// =============================================================================
// ROW HELPERS
// =============================================================================

/// Link to the progress page for `ppr`.
#[must_use]
pub fn progress_href(config: &AppConfig, ppr: &Ppr) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("codigo", &ppr.codigo)
        .append_pair("id", &ppr.id.to_string())
        .finish();
    format!("{}?{query}", config.page_href(Page::PprProgress))
}

#[must_use]
pub fn delete_prompt(ppr: &Ppr) -> String {
    format!("Are you sure you want to delete PPR {}?", ppr.codigo)
}

/// One-line summary shown by the "view" action.
#[must_use]
pub fn details_line(ppr: &Ppr) -> String {
    let mut line = format!("{}: {} ({}, {})", ppr.codigo, ppr.nombre, ppr.estado.label(), ppr.ano_ejecucion);
    if let Some(unit) = ppr.unidad_medida.as_deref().filter(|u| !u.is_empty()) {
        line.push_str(&format!(" measured in {unit}"));
    }
    line
}

// =============================================================================
// PAGE
// =============================================================================

#[component]
pub fn PprPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    if !install_page_guard(&session, Page::Ppr).allowed() {
        return view! { <p class="page-redirect">"Redirecting to login..."</p> }.into_any();
    }

    let profile = session.profile();
    let can_manage = profile.as_ref().is_some_and(|p| p.role.can_manage_pprs());
    let planner_id = profile.as_ref().and_then(|p| p.user_id);
    let this_year = session.current_year();

    let year_filter = RwSignal::new(this_year.to_string());
    let refresh = RwSignal::new(0_u32);
    let show_create = RwSignal::new(false);
    let create_form = RwSignal::new(PprForm::for_year(this_year));
    let editing = RwSignal::new(None::<Ppr>);
    let edit_form = RwSignal::new(PprForm::default());

    let list_session = session.clone();
    let pprs = LocalResource::new(move || {
        refresh.track();
        let filter = PprFilter { ano_ejecucion: parse_year(&year_filter.get()), ..PprFilter::default() };
        let session = list_session.clone();
        async move {
            match api::list_pprs(&session, &filter).await {
                Ok(rows) => rows,
                Err(err) => {
                    notify_api_error(notices, &err);
                    Vec::new()
                }
            }
        }
    });

    let create_session = session.clone();
    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let payload = match create_form.get().to_create(planner_id) {
            Ok(payload) => payload,
            Err(err) => {
                notify(notices, NoticeKind::Error, err.to_string());
                return;
            }
        };
        let session = create_session.clone();
        leptos::task::spawn_local(async move {
            match api::create_ppr(&session, &payload).await {
                Ok(created) => {
                    notify(notices, NoticeKind::Success, format!("PPR {} created", created.codigo));
                    create_form.set(PprForm::for_year(this_year));
                    show_create.set(false);
                    refresh.update(|n| *n += 1);
                }
                Err(err) => notify_api_error(notices, &err),
            }
        });
    };

    let save_session = session.clone();
    let on_save_edit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(original) = editing.get() else {
            return;
        };
        let update = match edit_form.get().to_update(&original) {
            Ok(update) => update,
            Err(err) => {
                notify(notices, NoticeKind::Error, err.to_string());
                return;
            }
        };
        if update == PprUpdate::default() {
            editing.set(None);
            return;
        }
        let session = save_session.clone();
        leptos::task::spawn_local(async move {
            match api::update_ppr(&session, original.id, &update).await {
                Ok(saved) => {
                    notify(notices, NoticeKind::Success, format!("PPR {} updated", saved.codigo));
                    editing.set(None);
                    refresh.update(|n| *n += 1);
                }
                Err(err) => notify_api_error(notices, &err),
            }
        });
    };

    let row_session = session.clone();
    let render_row = move |ppr: Ppr| {
        let view_line = details_line(&ppr);
        let href = progress_href(row_session.config(), &ppr);
        let nav_session = row_session.clone();
        let delete_session = row_session.clone();
        let edit_target = ppr.clone();
        let delete_target = ppr.clone();

        let on_view = move |_| notify(notices, NoticeKind::Info, view_line.clone());
        let on_progress = move |_| nav_session.navigate_href(&href);
        let on_edit = move |_| {
            edit_form.set(PprForm::from_ppr(&edit_target));
            editing.set(Some(edit_target.clone()));
        };
        let on_delete = move |_| {
            if !confirm(&delete_prompt(&delete_target)) {
                return;
            }
            let session = delete_session.clone();
            let target = delete_target.clone();
            leptos::task::spawn_local(async move {
                match api::delete_ppr(&session, target.id).await {
                    Ok(()) => {
                        notify(notices, NoticeKind::Success, format!("PPR {} deleted", target.codigo));
                        refresh.update(|n| *n += 1);
                    }
                    Err(err) => notify_api_error(notices, &err),
                }
            });
        };

        view! {
            <tr>
                <td>{ppr.codigo.clone()}</td>
                <td>{ppr.nombre.clone()}</td>
                <td>{ppr.unidad_medida.clone().unwrap_or_default()}</td>
                <td><span class=format!("status status--{}", ppr.estado.code())>{ppr.estado.label()}</span></td>
                <td>{ppr.ano_ejecucion}</td>
                <td class="ppr-table__actions">
                    <button class="btn btn--small" title="View" on:click=on_view>"View"</button>
                    <Show when=move || can_manage>
                        <button class="btn btn--small" title="Edit" on:click=on_edit.clone()>"Edit"</button>
                    </Show>
                    <button class="btn btn--small" title="Progress" on:click=on_progress>"Progress"</button>
                    <Show when=move || can_manage>
                        <button class="btn btn--small btn--danger" title="Delete" on:click=on_delete.clone()>"Delete"</button>
                    </Show>
                </td>
            </tr>
        }
    };

    view! {
        <NoticeBanner/>
        <div class="ppr-page">
            <NavBar active=Page::Ppr/>
            <header class="ppr-page__header">
                <h1>"PPR"</h1>
                <label class="ppr-page__filter">
                    "Year "
                    <input
                        type="number"
                        prop:value=move || year_filter.get()
                        on:change=move |ev| year_filter.set(event_target_value(&ev))
                    />
                </label>
                <Show when=move || can_manage>
                    <button class="btn btn--primary" on:click=move |_| show_create.update(|s| *s = !*s)>
                        "+ New PPR"
                    </button>
                </Show>
            </header>

            <Show when=move || show_create.get()>
                <form class="ppr-form" on:submit=on_create.clone()>
                    <h2>"New PPR"</h2>
                    <PprFormFields form=create_form lock_codigo=false/>
                    <div class="ppr-form__actions">
                        <button class="btn" type="button" on:click=move |_| show_create.set(false)>"Cancel"</button>
                        <button class="btn btn--primary" type="submit">"Save"</button>
                    </div>
                </form>
            </Show>

            <Show when=move || editing.get().is_some()>
                <form class="ppr-form" on:submit=on_save_edit.clone()>
                    <h2>{move || format!("Edit {}", editing.get().map(|p| p.codigo).unwrap_or_default())}</h2>
                    <PprFormFields form=edit_form lock_codigo=true/>
                    <div class="ppr-form__actions">
                        <button class="btn" type="button" on:click=move |_| editing.set(None)>"Cancel"</button>
                        <button class="btn btn--primary" type="submit">"Save"</button>
                    </div>
                </form>
            </Show>

            <Suspense fallback=move || view! { <p>"Loading PPRs..."</p> }>
                {move || {
                    pprs.get()
                        .map(|rows| {
                            if rows.is_empty() {
                                return view! { <p class="ppr-page__empty">"No PPRs for this year."</p> }.into_any();
                            }
                            let render_row = render_row.clone();
                            view! {
                                <table class="ppr-table">
                                    <thead>
                                        <tr>
                                            <th>"Code"</th>
                                            <th>"Name"</th>
                                            <th>"Unit"</th>
                                            <th>"Status"</th>
                                            <th>"Year"</th>
                                            <th>"Actions"</th>
                                        </tr>
                                    </thead>
                                    <tbody>{rows.into_iter().map(render_row).collect::<Vec<_>>()}</tbody>
                                </table>
                            }
                            .into_any()
                        })
                }}
            </Suspense>
        </div>
    }
    .into_any()
}

/// Inputs shared by the create and edit forms.
#[component]
fn PprFormFields(form: RwSignal<PprForm>, lock_codigo: bool) -> impl IntoView {
    view! {
        <label class="ppr-form__label">
            "Code"
            <input
                type="text"
                disabled=lock_codigo
                prop:value=move || form.get().codigo
                on:input=move |ev| form.update(|f| f.codigo = event_target_value(&ev))
            />
        </label>
        <label class="ppr-form__label">
            "Name"
            <input
                type="text"
                prop:value=move || form.get().nombre
                on:input=move |ev| form.update(|f| f.nombre = event_target_value(&ev))
            />
        </label>
        <label class="ppr-form__label">
            "Description"
            <textarea
                prop:value=move || form.get().descripcion
                on:input=move |ev| form.update(|f| f.descripcion = event_target_value(&ev))
            ></textarea>
        </label>
        <label class="ppr-form__label">
            "Unit of measure"
            <input
                type="text"
                prop:value=move || form.get().unidad_medida
                on:input=move |ev| form.update(|f| f.unidad_medida = event_target_value(&ev))
            />
        </label>
        <label class="ppr-form__label">
            "Status"
            <select
                prop:value=move || form.get().estado.code()
                on:change=move |ev| {
                    if let Some(status) = PprStatus::from_code(&event_target_value(&ev)) {
                        form.update(|f| f.estado = status);
                    }
                }
            >
                {PprStatus::ALL
                    .into_iter()
                    .map(|s| view! { <option value=s.code()>{s.label()}</option> })
                    .collect::<Vec<_>>()}
            </select>
        </label>
        <label class="ppr-form__label">
            "Execution year"
            <input
                type="number"
                prop:value=move || form.get().ano_ejecucion
                on:input=move |ev| form.update(|f| f.ano_ejecucion = event_target_value(&ev))
            />
        </label>
    }
}
