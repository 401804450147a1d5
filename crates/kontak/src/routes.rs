//! Route handlers, one per (verb, path) pair.
//!
//! Each handler is a single-shot transition with no cross-request state
//! beyond the session store: validate the input, touch the contact
//! store, set a flash message, and answer with a rendered page or a
//! 303 redirect to `/contact`.

use askama::Template;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{middleware, Extension, Form, Router};
use kontak_core::{validate_submission, ContactDraft, ContactId, SessionId, SubmissionMode};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::middleware::session_layer;
use crate::state::AppState;
use crate::views::{
    AboutPage, AddContactPage, ContactListPage, ContactView, DetailPage, EditContactPage,
    FormValues, IndexPage, Mahasiswa,
};

/// Flash key used by every handler, mirroring `req.flash('msg', ...)`.
const FLASH_KEY: &str = "msg";

const MSG_ADDED: &str = "Data contact berhasl ditambahkan!";
const MSG_UPDATED: &str = "Data Contact berhasil diubah!";
const MSG_DELETED: &str = "Data Contact berhasil dihapus";

const TITLE_HOME: &str = "Web Browser Express EJS";
const TITLE_ABOUT: &str = "Halaman About";
const TITLE_LIST: &str = "Halaman Contact";
const TITLE_ADD: &str = "Form Tambah Data Contact";
const TITLE_EDIT: &str = "Form Ubah Data Contact";
const TITLE_DETAIL: &str = "Halaman Detail Contact";

/// Fixed illustrative list on the landing page.
const MAHASISWA: [Mahasiswa; 3] = [
    Mahasiswa {
        nama: "fadhlan",
        email: "fadhlan@gmail.com",
    },
    Mahasiswa {
        nama: "satrio",
        email: "satrio@gmail.com",
    },
    Mahasiswa {
        nama: "adli",
        email: "adli@gmail.com",
    },
];

/// Body of an add/edit submission. Missing fields default to empty so
/// validation sees the whole picture instead of a 422.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub nama: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub nohp: String,
    #[serde(default, rename = "oldNama")]
    pub old_nama: String,
}

impl ContactForm {
    fn draft(&self) -> ContactDraft {
        ContactDraft::new(&self.nama, &self.nohp, &self.email)
    }

    fn values(&self) -> FormValues {
        FormValues {
            id: self.id.clone(),
            nama: self.nama.clone(),
            nohp: self.nohp.clone(),
            email: self.email.clone(),
            old_nama: self.old_nama.clone(),
        }
    }
}

/// Body of a delete submission.
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    pub nama: String,
}

/// Assemble the application router.
///
/// The method-override rewrite is NOT part of this router; it has to
/// run before routing and is applied around it in [`crate::app`].
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/about", get(about))
        .route(
            "/contact",
            get(contact_list)
                .post(contact_create)
                .put(contact_update)
                .delete(contact_delete),
        )
        .route("/contact/add", get(contact_add_form))
        .route("/contact/edit/:nama", get(contact_edit_form))
        .route("/contact/:nama", get(contact_detail))
        .layer(middleware::from_fn_with_state(state.clone(), session_layer))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn render<T: Template>(page: &T) -> Result<Html<String>, AppError> {
    Ok(Html(page.render()?))
}

async fn index() -> Result<Html<String>, AppError> {
    render(&IndexPage {
        title: TITLE_HOME,
        nama: "Fadhlanadli",
        mahasiswa: MAHASISWA.to_vec(),
    })
}

async fn about() -> Result<Html<String>, AppError> {
    render(&AboutPage { title: TITLE_ABOUT })
}

async fn contact_list(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Html<String>, AppError> {
    let contacts = state
        .store
        .find_all()
        .await?
        .into_iter()
        .map(ContactView::from)
        .collect();
    render(&ContactListPage {
        title: TITLE_LIST,
        contacts,
        msg: state.sessions.flash_take(&session, FLASH_KEY),
    })
}

async fn contact_add_form() -> Result<Html<String>, AppError> {
    render(&AddContactPage {
        title: TITLE_ADD,
        errors: Vec::new(),
        values: FormValues::default(),
    })
}

async fn contact_create(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(form): Form<ContactForm>,
) -> Result<Response, AppError> {
    let draft = form.draft();
    let errors = validate_submission(state.store.as_ref(), &draft, &SubmissionMode::Add).await?;
    if !errors.is_empty() {
        let page = AddContactPage {
            title: TITLE_ADD,
            errors,
            values: form.values(),
        };
        return Ok(render(&page)?.into_response());
    }

    let contact = state.store.insert(&draft).await?;
    tracing::info!(nama = %contact.nama, "contact added");
    state.sessions.flash_set(&session, FLASH_KEY, MSG_ADDED);
    Ok(Redirect::to("/contact").into_response())
}

async fn contact_edit_form(
    State(state): State<AppState>,
    Path(nama): Path<String>,
) -> Result<Html<String>, AppError> {
    let contact = state.store.find_by_name(&nama).await?;
    match contact {
        Some(contact) => render(&EditContactPage {
            title: TITLE_EDIT,
            errors: Vec::new(),
            values: FormValues::from(contact),
            found: true,
        }),
        None if state.strict_not_found => Err(AppError::NotFound),
        // Original behavior: the form renders around an absent record.
        None => render(&EditContactPage {
            title: TITLE_EDIT,
            errors: Vec::new(),
            values: FormValues::default(),
            found: false,
        }),
    }
}

async fn contact_update(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(form): Form<ContactForm>,
) -> Result<Response, AppError> {
    let draft = form.draft();
    let mode = SubmissionMode::Edit {
        old_nama: form.old_nama.clone(),
    };
    let errors = validate_submission(state.store.as_ref(), &draft, &mode).await?;
    if !errors.is_empty() {
        let page = EditContactPage {
            title: TITLE_EDIT,
            errors,
            values: form.values(),
            found: true,
        };
        return Ok(render(&page)?.into_response());
    }

    // A malformed or unknown id updates nothing; the flash and redirect
    // happen regardless, matching the original update semantics.
    if let Ok(id) = ContactId::parse(&form.id) {
        if state.store.update_by_id(&id, &draft).await?.is_some() {
            tracing::info!(nama = %draft.nama, "contact updated");
        }
    }
    state.sessions.flash_set(&session, FLASH_KEY, MSG_UPDATED);
    Ok(Redirect::to("/contact").into_response())
}

async fn contact_delete(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(form): Form<DeleteForm>,
) -> Result<Response, AppError> {
    let removed = state.store.delete_by_name(&form.nama).await?;
    if removed {
        tracing::info!(nama = %form.nama, "contact deleted");
    }
    // Deleting a missing contact is not an error; redirect either way.
    state.sessions.flash_set(&session, FLASH_KEY, MSG_DELETED);
    Ok(Redirect::to("/contact").into_response())
}

async fn contact_detail(
    State(state): State<AppState>,
    Path(nama): Path<String>,
) -> Result<Html<String>, AppError> {
    let contact = state.store.find_by_name(&nama).await?;
    match contact {
        Some(contact) => render(&DetailPage {
            title: TITLE_DETAIL,
            found: true,
            contact: ContactView::from(contact),
        }),
        None if state.strict_not_found => Err(AppError::NotFound),
        None => render(&DetailPage {
            title: TITLE_DETAIL,
            found: false,
            contact: ContactView::default(),
        }),
    }
}
