use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tower::ServiceExt;

use crate::{
    commands::{
        board::BoardRequest,
        login::{LoginRequest, LoginResponse},
        purchase_places::{PurchasePlacesRequest, PurchasePlacesResponse},
        view_booking::{ViewBookingRequest, ViewBookingResponse},
    },
    ports::{clock::ClockPort, database::DatabasePort},
};

use super::{
    error::AppError,
    templates::{BOARD, BOOKING, INDEX, WELCOME},
    AppState,
};

pub const INVALID_EMAIL: &str = "The provided email is not valid.";
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong-please try again";
pub const BOOKING_COMPLETE: &str = "Great-booking complete!";
pub const NOTHING_BOOKED: &str = "You didn't buy any places";
pub const INVALID_PLACES: &str = "You must enter a valid number of places";
pub const COMPETITION_OVER: &str = "This competition is already over.";

#[derive(Deserialize)]
pub struct LoginForm {
    email: Option<String>,
}

#[derive(Deserialize)]
pub struct PurchaseForm {
    competition: Option<String>,
    club: Option<String>,
    places: Option<String>,
}

pub async fn index<D, C>(State(state): State<AppState<D, C>>) -> Result<Response, AppError> {
    Ok(state
        .templates
        .render(INDEX, None, serde_json::json!({}))?
        .into_response())
}

pub async fn show_summary<D, C>(
    State(state): State<AppState<D, C>>,
    form: Option<Form<LoginForm>>,
) -> Result<Response, AppError>
where
    D: DatabasePort + Send + Sync + 'static,
    C: ClockPort + Send + Sync + 'static,
{
    let email = form.and_then(|Form(form)| form.email);
    let res = state.domain.clone().oneshot(LoginRequest { email }).await?;

    let response = match res {
        LoginResponse::Welcome(summary) => state
            .templates
            .render(WELCOME, None, summary)?
            .into_response(),
        LoginResponse::UnknownEmail => (
            StatusCode::UNAUTHORIZED,
            state
                .templates
                .render(INDEX, Some(INVALID_EMAIL), serde_json::json!({}))?,
        )
            .into_response(),
    };

    Ok(response)
}

pub async fn book<D, C>(
    State(state): State<AppState<D, C>>,
    Path((competition, club)): Path<(String, String)>,
) -> Result<Response, AppError>
where
    D: DatabasePort + Send + Sync + 'static,
    C: ClockPort + Send + Sync + 'static,
{
    let res = state
        .domain
        .clone()
        .oneshot(ViewBookingRequest { competition, club })
        .await?;

    let response = match res {
        ViewBookingResponse::Form(form) => state
            .templates
            .render(BOOKING, None, form)?
            .into_response(),
        ViewBookingResponse::UnknownCompetition(summary) => (
            StatusCode::NOT_FOUND,
            state
                .templates
                .render(WELCOME, Some(SOMETHING_WENT_WRONG), summary)?,
        )
            .into_response(),
        ViewBookingResponse::UnknownClub => lost_connection().await.into_response(),
    };

    Ok(response)
}

/// Requests that cannot be tied to a club send it back to the login page
pub async fn lost_connection() -> Redirect {
    Redirect::to("/")
}

pub async fn purchase_places<D, C>(
    State(state): State<AppState<D, C>>,
    form: Option<Form<PurchaseForm>>,
) -> Result<Response, AppError>
where
    D: DatabasePort + Send + Sync + 'static,
    C: ClockPort + Send + Sync + 'static,
{
    let req = match form {
        Some(Form(form)) => PurchasePlacesRequest {
            competition: form.competition,
            club: form.club,
            places: form.places,
        },
        None => PurchasePlacesRequest {
            competition: None,
            club: None,
            places: None,
        },
    };
    let res = state.domain.clone().oneshot(req).await?;

    let templates = &state.templates;
    let response = match res {
        PurchasePlacesResponse::Booked { summary, .. } => templates
            .render(WELCOME, Some(BOOKING_COMPLETE), summary)?
            .into_response(),
        PurchasePlacesResponse::NothingRequested(summary) => templates
            .render(WELCOME, Some(NOTHING_BOOKED), summary)?
            .into_response(),
        PurchasePlacesResponse::InvalidPlaces(form) => (
            StatusCode::BAD_REQUEST,
            templates.render(BOOKING, Some(INVALID_PLACES), form)?,
        )
            .into_response(),
        PurchasePlacesResponse::QuotaReached { summary, rejection } => (
            StatusCode::FORBIDDEN,
            templates.render(WELCOME, Some(rejection.to_string().as_str()), summary)?,
        )
            .into_response(),
        PurchasePlacesResponse::Rejected { form, rejection } => (
            StatusCode::BAD_REQUEST,
            templates.render(BOOKING, Some(rejection.to_string().as_str()), form)?,
        )
            .into_response(),
        PurchasePlacesResponse::CompetitionOver(summary) => (
            StatusCode::FORBIDDEN,
            templates.render(WELCOME, Some(COMPETITION_OVER), summary)?,
        )
            .into_response(),
        PurchasePlacesResponse::UnknownCompetition(summary) => (
            StatusCode::NOT_FOUND,
            templates.render(WELCOME, Some(SOMETHING_WENT_WRONG), summary)?,
        )
            .into_response(),
        PurchasePlacesResponse::UnknownClub => lost_connection().await.into_response(),
    };

    Ok(response)
}

pub async fn board<D, C>(State(state): State<AppState<D, C>>) -> Result<Response, AppError>
where
    D: DatabasePort + Send + Sync + 'static,
    C: ClockPort + Send + Sync + 'static,
{
    let res = state.domain.clone().oneshot(BoardRequest).await?;

    Ok(state
        .templates
        .render(BOARD, None, serde_json::json!({ "clubs": res.clubs }))?
        .into_response())
}

pub async fn logout() -> Redirect {
    Redirect::to("/")
}
