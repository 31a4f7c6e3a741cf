//! HTTP host for the registry page.
//!
//! Every browser gets its own [`PageDocument`] and [`PageState`], found
//! through an id kept in its session cookie. Form posts are turned into
//! [`UiEvent`]s, handled under that page's lock and answered with a redirect
//! back to the page. Alerts leave the page as flash messages.

use std::collections::HashMap;
use std::sync::Arc;

use actix_session::Session;
use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{FlashMessage, Level};
use serde::Serialize;
use tera::{Context, Tera};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::api::CustomerApi;
use crate::api::http::HttpCustomerApi;
use crate::controller::{FormController, UiEvent};
use crate::domain::page::PageState;
use crate::domain::types::CustomerId;
use crate::view::AlertLevel;
use crate::view::page::PageDocument;

pub mod main;

/// Session key holding the id of the visitor's page.
pub const PAGE_ID_KEY: &str = "page_id";

/// Delete question waiting for the user's answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub message: String,
    pub id: CustomerId,
}

/// One visitor's page.
#[derive(Debug, Default)]
pub struct PageSession {
    pub document: PageDocument,
    pub state: PageState,
    pub prompt: Option<Prompt>,
}

pub type SharedPage = Arc<Mutex<PageSession>>;

/// Controller plus the pages it drives, one per session.
pub struct PageRegistry<A> {
    controller: FormController<A>,
    pages: Mutex<HashMap<Uuid, SharedPage>>,
}

pub type CustomerPages = PageRegistry<HttpCustomerApi>;

impl<A> PageRegistry<A>
where
    A: CustomerApi,
{
    pub fn new(controller: FormController<A>) -> Self {
        Self {
            controller,
            pages: Mutex::new(HashMap::new()),
        }
    }

    /// Page of the visitor behind `session`, created on first use.
    ///
    /// Ids the registry does not know (e.g. after a restart) get a fresh page.
    pub async fn page(&self, session: &Session) -> SharedPage {
        let page_id = match session.get::<Uuid>(PAGE_ID_KEY) {
            Ok(Some(page_id)) => page_id,
            Ok(None) => self.start_page(session),
            Err(err) => {
                log::warn!("Unreadable page id in session: {err}");
                self.start_page(session)
            }
        };

        let mut pages = self.pages.lock().await;
        pages.entry(page_id).or_default().clone()
    }

    fn start_page(&self, session: &Session) -> Uuid {
        let page_id = Uuid::new_v4();
        if let Err(err) = session.insert(PAGE_ID_KEY, page_id) {
            log::error!("Failed to store page id in session: {err}");
        }
        page_id
    }

    /// Applies posted input with `prepare`, then runs `event` to completion
    /// on the visitor's page.
    ///
    /// Events of one visitor are serialized by the page lock. Alerts raised
    /// by the event are sent as flash messages. Returns the URL the page
    /// asked to navigate to, if any.
    pub async fn dispatch<F>(&self, session: &Session, event: UiEvent, prepare: F) -> Option<String>
    where
        F: FnOnce(&mut PageDocument),
    {
        let page = self.page(session).await;
        let mut guard = page.lock().await;
        let PageSession {
            document,
            state,
            prompt,
        } = &mut *guard;

        prepare(document);
        *prompt = None;

        self.controller.handle(document, state, event).await;

        if let UiEvent::DeleteRow(id) = event {
            *prompt = document
                .take_confirmation_request()
                .map(|message| Prompt { message, id });
        }

        for alert in document.take_alerts() {
            match alert.level {
                AlertLevel::Success => FlashMessage::success(alert.message).send(),
                AlertLevel::Error => FlashMessage::error(alert.message).send(),
            }
        }

        document.take_navigation()
    }
}

pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
