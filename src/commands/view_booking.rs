use std::task::{Context, Poll};

use serde::Serialize;
use tower::Service;

use crate::{
    domain::{booking::quota_left, Club, Competition},
    ports::{clock::ClockPort, database::DatabasePort},
};

use super::{summary, DomainLogic, Error, ServiceFuture, Summary};

pub struct ViewBookingRequest {
    pub competition: String,
    pub club: String,
}

/// Everything the booking form shows
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BookingForm {
    pub club: Club,
    pub competition: Competition,
    /// Places the club may still buy for this competition
    pub quota_left: u32,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ViewBookingResponse {
    Form(BookingForm),
    UnknownCompetition(Summary),
    UnknownClub,
}

impl<D, C> Service<ViewBookingRequest> for DomainLogic<D, C>
where
    D: DatabasePort + Send + Sync + 'static,
    C: ClockPort + Send + Sync + 'static,
{
    type Response = ViewBookingResponse;
    type Error = Error;
    type Future = ServiceFuture<Self::Response>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ViewBookingRequest) -> Self::Future {
        let database = self.database.clone();
        let clock = self.clock.clone();
        let max_places_per_club = self.max_places_per_club;
        Box::pin(async move {
            let Some(club) = database.find_club_by_name(&req.club).await? else {
                return Ok(ViewBookingResponse::UnknownClub);
            };
            let Some(competition) = database.find_competition(&req.competition).await? else {
                return Ok(ViewBookingResponse::UnknownCompetition(
                    summary(database.as_ref(), clock.as_ref(), club).await?,
                ));
            };

            Ok(ViewBookingResponse::Form(
                booking_form(database.as_ref(), club, competition, max_places_per_club).await?,
            ))
        })
    }
}

pub(super) async fn booking_form<D>(
    database: &D,
    club: Club,
    competition: Competition,
    max_places_per_club: u32,
) -> Result<BookingForm, Error>
where
    D: DatabasePort + ?Sized,
{
    let booked = database
        .booked_places(&competition.name, &club.name)
        .await?;

    Ok(BookingForm {
        quota_left: quota_left(max_places_per_club, booked),
        club,
        competition,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{database, frozen_clock};
    use rstest::*;
    use speculoos::prelude::*;
    use tower::{BoxError, ServiceExt};

    fn request(competition: &str, club: &str) -> ViewBookingRequest {
        ViewBookingRequest {
            competition: competition.to_string(),
            club: club.to_string(),
        }
    }

    #[tokio::test]
    async fn test_form() -> Result<(), BoxError> {
        let database = database();
        database
            .register_booking("Competition 001", "Club 003", 7, 12)
            .await?;
        let domain = DomainLogic::new(database, frozen_clock(), 12);

        let res = domain
            .oneshot(request("Competition 001", "Club 003"))
            .await?;

        assert_that!(res).matches(|res| {
            matches!(
                res,
                ViewBookingResponse::Form(BookingForm {
                    quota_left: 5,
                    club: Club { points: 23, .. },
                    competition: Competition {
                        number_of_places: 18,
                        ..
                    },
                })
            )
        });
        Ok(())
    }

    #[rstest]
    #[case("Competition 001", "Club 999")]
    #[case("Competition 999", "Club 999")]
    #[case("", "")]
    #[tokio::test]
    async fn test_unknown_club(
        #[case] competition: &str,
        #[case] club: &str,
    ) -> Result<(), BoxError> {
        let domain = DomainLogic::new(database(), frozen_clock(), 12);

        let res = domain.oneshot(request(competition, club)).await?;

        assert_that!(res).is_equal_to(ViewBookingResponse::UnknownClub);
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_competition() -> Result<(), BoxError> {
        let domain = DomainLogic::new(database(), frozen_clock(), 12);

        let res = domain
            .oneshot(request("Competition 999", "Club 001"))
            .await?;

        assert_that!(res).matches(|res| {
            matches!(res, ViewBookingResponse::UnknownCompetition(summary) if summary.club.name == "Club 001")
        });
        Ok(())
    }
}
