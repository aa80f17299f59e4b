use std::task::{Context, Poll};

use tower::Service;

use crate::{
    domain::Club,
    ports::{clock::ClockPort, database::DatabasePort},
};

use super::{DomainLogic, Error, ServiceFuture};

/// Public points board, no login needed
pub struct BoardRequest;

#[derive(Debug, PartialEq, Eq)]
pub struct BoardResponse {
    pub clubs: Vec<Club>,
}

impl<D, C> Service<BoardRequest> for DomainLogic<D, C>
where
    D: DatabasePort + Send + Sync + 'static,
    C: ClockPort + Send + Sync + 'static,
{
    type Response = BoardResponse;
    type Error = Error;
    type Future = ServiceFuture<Self::Response>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _req: BoardRequest) -> Self::Future {
        let database = self.database.clone();
        Box::pin(async move {
            Ok(BoardResponse {
                clubs: database.list_clubs().await?,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        commands::test_support::{club, frozen_clock},
        ports::{clock::MockClockPort, database::MockDatabasePort},
    };
    use speculoos::prelude::*;
    use tower::{BoxError, ServiceExt};

    #[tokio::test]
    async fn test_call() -> Result<(), BoxError> {
        // GIVEN a database with two clubs
        let mut database = MockDatabasePort::new();
        database.expect_list_clubs().times(1).returning(|| {
            Ok(vec![
                club("Club 001", "001_club@gudlift.com", 13),
                club("Club 002", "002_club@gudlift.com", 4),
            ])
        });
        // The board does not depend on the time
        let mut clock = MockClockPort::new();
        clock.expect_now().never();

        // WHEN calling the service
        let res = DomainLogic::new(database, clock, 12)
            .oneshot(BoardRequest)
            .await?;

        // THEN every club is listed with its points
        let points: Vec<_> = res.clubs.iter().map(|club| club.points).collect();
        assert_that!(points).is_equal_to(vec![13, 4]);
        Ok(())
    }

    #[tokio::test]
    async fn test_database_error() {
        let mut database = MockDatabasePort::new();
        database
            .expect_list_clubs()
            .returning(|| Err(crate::ports::database::Error::Adapter("offline".into())));

        let res = DomainLogic::new(database, frozen_clock(), 12)
            .oneshot(BoardRequest)
            .await;

        assert_that!(res)
            .is_err()
            .matches(|err| matches!(err, Error::Database(_)));
    }
}
