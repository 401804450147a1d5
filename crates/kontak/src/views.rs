//! Askama view models, one struct per rendered page.
//!
//! Templates live in `templates/` and all extend `base.html`, which
//! expects a `title` on every page. Domain types are flattened into
//! plain-string view structs before rendering; templates never see an
//! `Option`.

use askama::Template;
use kontak_core::{Contact, FieldError};

/// A contact flattened for rendering; absent email becomes "".
#[derive(Debug, Clone, Default)]
pub struct ContactView {
    pub nama: String,
    pub nohp: String,
    pub email: String,
}

impl From<Contact> for ContactView {
    fn from(contact: Contact) -> Self {
        Self {
            nama: contact.nama,
            nohp: contact.nohp,
            email: contact.email.unwrap_or_default(),
        }
    }
}

/// Submitted (or prefilled) form values, echoed back so no input is
/// lost when validation rejects a submission.
#[derive(Debug, Clone, Default)]
pub struct FormValues {
    pub id: String,
    pub nama: String,
    pub nohp: String,
    pub email: String,
    pub old_nama: String,
}

impl From<Contact> for FormValues {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id.to_string(),
            old_nama: contact.nama.clone(),
            nama: contact.nama,
            nohp: contact.nohp,
            email: contact.email.unwrap_or_default(),
        }
    }
}

/// An illustrative student entry on the landing page.
#[derive(Debug, Clone, Copy)]
pub struct Mahasiswa {
    pub nama: &'static str,
    pub email: &'static str,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub title: &'static str,
    pub nama: &'static str,
    pub mahasiswa: Vec<Mahasiswa>,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutPage {
    pub title: &'static str,
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactListPage {
    pub title: &'static str,
    pub contacts: Vec<ContactView>,
    pub msg: Vec<String>,
}

#[derive(Template)]
#[template(path = "add-contact.html")]
pub struct AddContactPage {
    pub title: &'static str,
    pub errors: Vec<FieldError>,
    pub values: FormValues,
}

#[derive(Template)]
#[template(path = "edit-contact.html")]
pub struct EditContactPage {
    pub title: &'static str,
    pub errors: Vec<FieldError>,
    pub values: FormValues,
    pub found: bool,
}

#[derive(Template)]
#[template(path = "detail.html")]
pub struct DetailPage {
    pub title: &'static str,
    pub found: bool,
    pub contact: ContactView,
}
