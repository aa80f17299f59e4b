//! Buying places in a competition
//!
//! Checks run in a fixed order: unknown club, unknown competition, malformed or non-positive
//! number of places, competition already over. Quota and balances are checked by the database
//! port while it applies the booking, so that both happen atomically.
use std::task::{Context, Poll};

use tower::Service;
use tracing::{debug, info};

use crate::{
    domain::booking::{parse_places, Rejection},
    ports::{
        clock::ClockPort,
        database::{Booking, DatabasePort, Error as DatabaseError},
    },
};

use super::{
    summary,
    view_booking::{booking_form, BookingForm},
    DomainLogic, Error, ServiceFuture, Summary,
};

/// Raw form fields, exactly as submitted
pub struct PurchasePlacesRequest {
    pub competition: Option<String>,
    pub club: Option<String>,
    pub places: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum PurchasePlacesResponse {
    Booked { summary: Summary, booking: Booking },
    /// Zero places requested, or the field was left out
    NothingRequested(Summary),
    /// Negative or not an integer
    InvalidPlaces(BookingForm),
    /// The club has no quota left for this competition
    QuotaReached {
        summary: Summary,
        rejection: Rejection,
    },
    /// The request is larger than the quota or one of the balances
    Rejected {
        form: BookingForm,
        rejection: Rejection,
    },
    CompetitionOver(Summary),
    UnknownCompetition(Summary),
    UnknownClub,
}

impl<D, C> Service<PurchasePlacesRequest> for DomainLogic<D, C>
where
    D: DatabasePort + Send + Sync + 'static,
    C: ClockPort + Send + Sync + 'static,
{
    type Response = PurchasePlacesResponse;
    type Error = Error;
    type Future = ServiceFuture<Self::Response>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: PurchasePlacesRequest) -> Self::Future {
        let database = self.database.clone();
        let clock = self.clock.clone();
        let max_places_per_club = self.max_places_per_club;
        Box::pin(async move {
            let database = database.as_ref();
            let clock = clock.as_ref();

            // Resolve the club and competition
            let club = match req.club {
                Some(name) => database.find_club_by_name(&name).await?,
                None => None,
            };
            let Some(club) = club else {
                return Ok(PurchasePlacesResponse::UnknownClub);
            };
            let competition = match req.competition {
                Some(name) => database.find_competition(&name).await?,
                None => None,
            };
            let Some(competition) = competition else {
                return Ok(PurchasePlacesResponse::UnknownCompetition(
                    summary(database, clock, club).await?,
                ));
            };

            // Validate the number of places
            let requested = match req.places.as_deref().map(parse_places) {
                None | Some(Ok(0)) => {
                    return Ok(PurchasePlacesResponse::NothingRequested(
                        summary(database, clock, club).await?,
                    ));
                }
                // Negative counts and counts too large to ever be granted
                Some(Ok(places)) => u32::try_from(places).ok(),
                Some(Err(_)) => None,
            };
            let Some(requested) = requested else {
                debug!(club = %club.name, places = ?req.places, "Invalid number of places");
                return Ok(PurchasePlacesResponse::InvalidPlaces(
                    booking_form(database, club, competition, max_places_per_club).await?,
                ));
            };

            if competition.is_past(clock.now()) {
                debug!(competition = %competition.name, "Purchase for a past competition");
                return Ok(PurchasePlacesResponse::CompetitionOver(
                    summary(database, clock, club).await?,
                ));
            }

            // Book the places
            match database
                .register_booking(
                    &competition.name,
                    &club.name,
                    requested,
                    max_places_per_club,
                )
                .await
            {
                Ok(booking) => {
                    info!(
                        club = %club.name,
                        competition = %competition.name,
                        places = requested,
                        booking_id = %booking.event.booking_id,
                        "Places booked"
                    );
                    Ok(PurchasePlacesResponse::Booked {
                        summary: summary(database, clock, booking.club.clone()).await?,
                        booking,
                    })
                }
                Err(DatabaseError::Rejected(rejection)) => {
                    debug!(club = %club.name, competition = %competition.name, %rejection, "Booking rejected");
                    match rejection {
                        Rejection::NothingRequested => {
                            return Ok(PurchasePlacesResponse::NothingRequested(
                                summary(database, clock, club).await?,
                            ));
                        }
                        Rejection::QuotaReached { .. } => {
                            return Ok(PurchasePlacesResponse::QuotaReached {
                                summary: summary(database, clock, club).await?,
                                rejection,
                            });
                        }
                        _ => {}
                    }
                    Ok(PurchasePlacesResponse::Rejected {
                        form: booking_form(database, club, competition, max_places_per_club)
                            .await?,
                        rejection,
                    })
                }
                // The records existed a moment ago, report them as they are now
                Err(DatabaseError::ClubNotFound(_)) => Ok(PurchasePlacesResponse::UnknownClub),
                Err(DatabaseError::CompetitionNotFound(_)) => {
                    Ok(PurchasePlacesResponse::UnknownCompetition(
                        summary(database, clock, club).await?,
                    ))
                }
                Err(err) => Err(err.into()),
            }
        })
    }
}
