//! Places, points and quota arithmetic
//!
//! One point buys one place. A club can only buy a limited number of places for a given
//! competition, tracked across requests by the booking ledger.
use uuid::Uuid;

use super::{Club, Competition};

/// Default number of places a club may buy for a single competition
pub const MAXIMUM_PLACES_PER_CLUB: u32 = 12;

/// Reasons for refusing a well-formed request for places
///
/// The messages are shown to the club as-is.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("You didn't buy any places")]
    NothingRequested,

    /// The club already used its whole quota for the competition
    #[error(
        "Your club has already bought {max_allowed} places for this competition. No more purchases allowed"
    )]
    QuotaReached { max_allowed: u32 },

    #[error("Your request exceed the maximum allowed. Requested : {requested}, still allowed {remaining}")]
    QuotaExceeded { requested: u32, remaining: u32 },

    #[error("You don't have enough points to proceed with your request. Requested : {requested}, still allowed : {available}")]
    NotEnoughPoints { requested: u32, available: u32 },

    #[error("Not enough available places for this competition. Requested : {requested}, still available : {available}")]
    NotEnoughPlaces { requested: u32, available: u32 },
}

/// The requested number of places is not an integer
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid number of places: {0:?}")]
pub struct InvalidPlaces(pub String);

/// A single successful purchase, as recorded in the ledger
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingEvent {
    pub booking_id: Uuid,
    pub places: u32,
}

/// Places bought by one club for one competition
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Running total of places bought
    pub total: u32,
    pub events: Vec<BookingEvent>,
}

impl LedgerEntry {
    pub fn record(&mut self, places: u32) -> &BookingEvent {
        self.total += places;
        self.events.push(BookingEvent {
            booking_id: Uuid::new_v4(),
            places,
        });
        &self.events[self.events.len() - 1]
    }
}

/// Parse a place count typed in by a club
///
/// Only an optional `-` followed by ASCII digits is accepted. Decimals and anything else are
/// invalid rather than truncated.
pub fn parse_places(input: &str) -> Result<i64, InvalidPlaces> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidPlaces(input.to_string()));
    }

    trimmed
        .parse()
        .map_err(|_| InvalidPlaces(input.to_string()))
}

/// Places still available to a club under the quota
pub fn quota_left(max_allowed: u32, already_booked: u32) -> u32 {
    max_allowed.saturating_sub(already_booked)
}

/// Number of places that can actually be granted for a request
///
/// Negative requests grant nothing. The result never exceeds the club's points, the
/// competition's places or the allowed maximum.
pub fn grantable_places(
    requested: i64,
    club_points: u32,
    competition_places: u32,
    max_allowed: u32,
) -> u32 {
    let requested = u32::try_from(requested.max(0)).unwrap_or(u32::MAX);
    requested
        .min(max_allowed)
        .min(club_points)
        .min(competition_places)
}

/// Check a request against the quota and both balances
///
/// An empty request is refused so that nothing is ever recorded for it.
pub fn check_booking(
    requested: u32,
    club: &Club,
    competition: &Competition,
    max_allowed: u32,
    already_booked: u32,
) -> Result<(), Rejection> {
    if requested == 0 {
        return Err(Rejection::NothingRequested);
    }
    let remaining = quota_left(max_allowed, already_booked);
    if remaining == 0 {
        return Err(Rejection::QuotaReached { max_allowed });
    }
    if requested > remaining {
        return Err(Rejection::QuotaExceeded {
            requested,
            remaining,
        });
    }
    if requested > club.points {
        return Err(Rejection::NotEnoughPoints {
            requested,
            available: club.points,
        });
    }
    if requested > competition.number_of_places {
        return Err(Rejection::NotEnoughPlaces {
            requested,
            available: competition.number_of_places,
        });
    }

    Ok(())
}

/// Take the grantable number of places out of both balances
///
/// Returns the number of places granted. Nothing changes when that number is zero.
pub fn apply_booking(
    requested: i64,
    club: &mut Club,
    competition: &mut Competition,
    max_allowed: u32,
) -> u32 {
    let granted = grantable_places(
        requested,
        club.points,
        competition.number_of_places,
        max_allowed,
    );
    if granted > 0 {
        club.points -= granted;
        competition.number_of_places -= granted;
    }

    granted
}
