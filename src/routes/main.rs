use actix_session::Session;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::{Context, Tera};

use crate::controller::UiEvent;
use crate::domain::customer::CustomerFields;
use crate::domain::types::CustomerId;
use crate::forms::customer::{PHONE_INPUT_PATTERN, PHONE_INPUT_TITLE};
use crate::forms::query::{DeleteForm, QueryForm};
use crate::routes::{CustomerPages, alert_level_to_str, redirect, render_template};

#[get("/")]
pub async fn show_index(
    session: Session,
    pages: web::Data<CustomerPages>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let page = pages.page(&session).await;
    let page = page.lock().await;

    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("page", &page.document);
    context.insert("prompt", &page.prompt);
    context.insert("phone_pattern", PHONE_INPUT_PATTERN);
    context.insert("phone_title", PHONE_INPUT_TITLE);

    render_template(&tera, "main/index.html", &context)
}

#[post("/cadastro")]
pub async fn submit_registration(
    session: Session,
    pages: web::Data<CustomerPages>,
    web::Form(form): web::Form<CustomerFields>,
) -> impl Responder {
    pages
        .dispatch(&session, UiEvent::SubmitRegistration, |doc| {
            doc.set_registration_values(form)
        })
        .await;
    redirect("/")
}

#[post("/consulta")]
pub async fn submit_query(
    session: Session,
    pages: web::Data<CustomerPages>,
    web::Form(form): web::Form<QueryForm>,
) -> impl Responder {
    pages
        .dispatch(&session, UiEvent::SubmitQuery, |doc| {
            doc.set_query(form.consulta_nome)
        })
        .await;
    redirect("/")
}

#[post("/pagina/anterior")]
pub async fn previous_page(session: Session, pages: web::Data<CustomerPages>) -> impl Responder {
    pages.dispatch(&session, UiEvent::PreviousPage, |_| {}).await;
    redirect("/")
}

#[post("/pagina/proxima")]
pub async fn next_page(session: Session, pages: web::Data<CustomerPages>) -> impl Responder {
    pages.dispatch(&session, UiEvent::NextPage, |_| {}).await;
    redirect("/")
}

#[post("/clientes/{id}/editar")]
pub async fn edit_customer(
    session: Session,
    pages: web::Data<CustomerPages>,
    id: web::Path<i64>,
) -> impl Responder {
    let id = CustomerId::new(id.into_inner());
    pages.dispatch(&session, UiEvent::EditRow(id), |_| {}).await;
    redirect("/")
}

#[post("/clientes/{id}/salvar")]
pub async fn save_customer(
    session: Session,
    pages: web::Data<CustomerPages>,
    id: web::Path<i64>,
    web::Form(form): web::Form<CustomerFields>,
) -> impl Responder {
    let id = CustomerId::new(id.into_inner());
    pages
        .dispatch(&session, UiEvent::SaveRow(id), |doc| {
            if !doc.set_row_values(id, &form) {
                log::warn!("Customer {id} is not being edited");
            }
        })
        .await;
    redirect("/")
}

#[post("/clientes/{id}/cancelar")]
pub async fn cancel_edit(
    session: Session,
    pages: web::Data<CustomerPages>,
    id: web::Path<i64>,
) -> impl Responder {
    let id = CustomerId::new(id.into_inner());
    pages.dispatch(&session, UiEvent::CancelEdit(id), |_| {}).await;
    redirect("/")
}

/// First post asks for confirmation; the prompt posts back with `confirmado`.
#[post("/clientes/{id}/deletar")]
pub async fn delete_customer(
    session: Session,
    pages: web::Data<CustomerPages>,
    id: web::Path<i64>,
    web::Form(form): web::Form<DeleteForm>,
) -> impl Responder {
    let id = CustomerId::new(id.into_inner());
    pages
        .dispatch(&session, UiEvent::DeleteRow(id), |doc| {
            if let Some(answer) = form.confirmado {
                doc.answer_confirmation(answer);
            }
        })
        .await;
    redirect("/")
}

#[post("/exportar")]
pub async fn export_customers(session: Session, pages: web::Data<CustomerPages>) -> impl Responder {
    match pages.dispatch(&session, UiEvent::Export, |_| {}).await {
        Some(url) => redirect(&url),
        None => redirect("/"),
    }
}
