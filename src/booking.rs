use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use futures::future::join_all;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::AppError;
use crate::models::booking::{
    Booking, BookingConfirmation, BookingRequest, JoinConfirmation, JoinableGame, NewBooking,
    SlotAvailability,
};
use crate::models::venue::{Venue, VenueSummary};
use crate::slots::{venue_slots, SlotTime};
use crate::store::BookingStore;

/// Largest number of seats a booking can leave open for other players.
pub const MAX_OPEN_SLOTS: i32 = 8;

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

fn join_labels(slots: &[SlotTime]) -> String {
    slots
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub async fn load_venue<S: BookingStore>(store: &S, venue_id: Uuid) -> Result<Venue, AppError> {
    match store.get_venue(venue_id).await {
        Ok(Some(venue)) => Ok(venue),
        Ok(None) => Err(AppError::NotFound("Venue not found".into())),
        Err(e) => {
            tracing::error!(%venue_id, "failed to load venue: {e}");
            Err(AppError::Load("Failed to load venue details".into()))
        }
    }
}

/// Marks each generated slot of `venue` as available unless some booking on
/// `date` already holds it.
pub async fn check_availability<S: BookingStore>(
    store: &S,
    venue: &Venue,
    date: NaiveDate,
) -> Result<Vec<SlotAvailability>, AppError> {
    let slots = venue_slots(&venue.opening_time, &venue.closing_time);
    if slots.is_empty() {
        return Ok(vec![]);
    }

    let bookings = store.list_bookings(venue.id, date).await.map_err(|e| {
        tracing::error!(venue_id = %venue.id, %date, "failed to load bookings: {e}");
        AppError::Load("Failed to load availability".into())
    })?;
    let booked: HashSet<SlotTime> = bookings.iter().map(|b| b.time_slot).collect();

    Ok(slots
        .into_iter()
        .map(|time| SlotAvailability {
            time,
            available: !booked.contains(&time),
        })
        .collect())
}

pub async fn availability<S: BookingStore>(
    store: &S,
    venue_id: Uuid,
    date: NaiveDate,
) -> Result<Vec<SlotAvailability>, AppError> {
    let venue = load_venue(store, venue_id).await?;
    check_availability(store, &venue, date).await
}

/// Anyone signed in may book, except a host booking the venue assigned to them.
pub fn authorize_booking<'a>(
    actor: Option<&'a AuthUser>,
    venue: &Venue,
) -> Result<&'a AuthUser, AppError> {
    let actor = actor.ok_or(AppError::Unauthorized)?;
    if actor.is_host() && venue.assigned_host == Some(actor.user_id) {
        return Err(AppError::Forbidden(
            "You cannot book your own assigned venue".into(),
        ));
    }
    Ok(actor)
}

fn parse_selection(labels: &[String]) -> Result<Vec<SlotTime>, AppError> {
    let slots = labels
        .iter()
        .map(|l| SlotTime::parse(l))
        .collect::<Result<BTreeSet<_>, _>>()?;
    if slots.is_empty() {
        return Err(AppError::BadRequest(
            "Please select at least one time slot".into(),
        ));
    }
    Ok(slots.into_iter().collect())
}

/// Writes one booking per selected slot, all carrying the same open-seat count.
///
/// The writes go out concurrently and are not transactional: if only some land,
/// the caller gets [`AppError::PartialWrite`] and the landed ones stay.
pub async fn book_slots<S: BookingStore>(
    store: &S,
    actor: Option<&AuthUser>,
    venue_id: Uuid,
    request: &BookingRequest,
    today: NaiveDate,
) -> Result<BookingConfirmation, AppError> {
    if actor.is_none() {
        return Err(AppError::Unauthorized);
    }
    if !(0..=MAX_OPEN_SLOTS).contains(&request.open_slots) {
        return Err(AppError::BadRequest(format!(
            "Open slots must be between 0 and {MAX_OPEN_SLOTS}"
        )));
    }
    // One day of slack for viewers whose calendar is behind the server's.
    if request.date < today - Duration::days(1) {
        return Err(AppError::BadRequest("Cannot book a date in the past".into()));
    }
    let selected = parse_selection(&request.time_slots)?;

    let venue = load_venue(store, venue_id).await?;
    let actor = authorize_booking(actor, &venue)?;

    let bookable: HashSet<SlotTime> = venue_slots(&venue.opening_time, &venue.closing_time)
        .into_iter()
        .collect();
    if let Some(outside) = selected.iter().find(|s| !bookable.contains(s)) {
        return Err(AppError::BadRequest(format!(
            "{outside} is not a bookable slot at {}",
            venue.title
        )));
    }

    let writes = selected.iter().map(|&time_slot| {
        let new = NewBooking {
            user_id: actor.user_id,
            venue_id: venue.id,
            date: request.date,
            time_slot,
            open_slots: request.open_slots,
            joined_slots: None,
            original_booking_id: None,
        };
        async move { (time_slot, store.create_booking(&new).await) }
    });

    let mut booking_ids = Vec::with_capacity(selected.len());
    let mut booked = Vec::new();
    let mut failed = Vec::new();
    for (slot, result) in join_all(writes).await {
        match result {
            Ok(id) => {
                booking_ids.push(id);
                booked.push(slot);
            }
            Err(e) => {
                tracing::error!(%venue_id, date = %request.date, %slot, "booking write failed: {e}");
                failed.push((slot, e));
            }
        }
    }

    if !failed.is_empty() {
        if booked.is_empty() {
            let (_, first) = failed.swap_remove(0);
            return Err(first);
        }
        let failed_slots: Vec<SlotTime> = failed.iter().map(|(s, _)| *s).collect();
        return Err(AppError::PartialWrite(format!(
            "Booked {} but could not book {}. The booked slots were kept.",
            join_labels(&booked),
            join_labels(&failed_slots)
        )));
    }

    tracing::info!(
        user_id = %actor.user_id,
        %venue_id,
        date = %request.date,
        slots = booked.len(),
        open_slots = request.open_slots,
        "booked slots"
    );

    let availability = match check_availability(store, &venue, request.date).await {
        Ok(a) => Some(a),
        Err(e) => {
            tracing::warn!(%venue_id, "availability refresh after booking failed: {e}");
            None
        }
    };

    let count = booked.len();
    let mut message = format!(
        "Successfully booked {count} time slot{} for {}",
        plural(count),
        request.date
    );
    if request.open_slots > 0 {
        message.push_str(&format!(" with {} open slots", request.open_slots));
    }

    Ok(BookingConfirmation {
        booking_ids,
        slots_booked: count,
        open_slots: (request.open_slots > 0).then_some(request.open_slots),
        message,
        availability,
    })
}

/// Claims `count` of the seats an existing booking left open.
///
/// The decrement and the joiner's booking are two separate writes; a failure of
/// the second leaves the seats consumed without a booking to show for them.
pub async fn join_open_slots<S: BookingStore>(
    store: &S,
    actor: Option<&AuthUser>,
    booking_id: Uuid,
    count: i32,
    now: NaiveDateTime,
) -> Result<JoinConfirmation, AppError> {
    let actor = actor.ok_or(AppError::Unauthorized)?;

    let target = match store.get_booking(booking_id).await {
        Ok(Some(b)) => b,
        Ok(None) => return Err(AppError::NotFound("Game not found".into())),
        Err(e) => {
            tracing::error!(%booking_id, "failed to load booking: {e}");
            return Err(AppError::Load("Failed to load game".into()));
        }
    };

    if count < 1 || count > target.open_slots {
        return Err(AppError::InvalidJoinCount {
            requested: count,
            open: target.open_slots,
        });
    }
    if target.time_slot.on(target.date) <= now {
        return Err(AppError::BadRequest("This game has already started".into()));
    }

    let remaining = store.decrement_open_slots(booking_id, count).await?;

    let new = NewBooking {
        user_id: actor.user_id,
        venue_id: target.venue_id,
        date: target.date,
        time_slot: target.time_slot,
        open_slots: 0,
        joined_slots: Some(count),
        original_booking_id: Some(booking_id),
    };
    let joined_id = store.create_booking(&new).await.map_err(|e| {
        tracing::error!(
            %booking_id,
            user_id = %actor.user_id,
            count,
            "open slots were decremented but the join booking failed: {e}"
        );
        AppError::PartialWrite(format!(
            "Reserved {count} slot{} on the game but could not record your booking",
            plural(count as usize)
        ))
    })?;

    tracing::info!(%booking_id, user_id = %actor.user_id, count, remaining, "joined game");

    Ok(JoinConfirmation {
        booking_id: joined_id,
        original_booking_id: booking_id,
        joined_slots: count,
        remaining_open_slots: remaining,
        message: format!(
            "Successfully joined the game! You've booked {count} slot{}.",
            plural(count as usize)
        ),
    })
}

/// Open-seat bookings that start after `now`, soonest first.
pub async fn list_joinable_games<S: BookingStore>(
    store: &S,
    now: NaiveDateTime,
) -> Result<Vec<JoinableGame>, AppError> {
    let mut bookings: Vec<Booking> = store
        .list_open_slot_bookings()
        .await
        .map_err(|e| {
            tracing::error!("failed to load open games: {e}");
            AppError::Load("Unable to load games at the moment".into())
        })?
        .into_iter()
        .filter(|b| b.time_slot.on(b.date) > now)
        .collect();
    bookings.sort_by_key(|b| b.time_slot.on(b.date));

    let mut venues: HashMap<Uuid, Option<VenueSummary>> = HashMap::new();
    let mut games = Vec::with_capacity(bookings.len());
    for booking in bookings {
        if !venues.contains_key(&booking.venue_id) {
            let summary = match store.get_venue(booking.venue_id).await {
                Ok(v) => v.as_ref().map(VenueSummary::from),
                Err(e) => {
                    tracing::warn!(venue_id = %booking.venue_id, "failed to load venue for game: {e}");
                    None
                }
            };
            venues.insert(booking.venue_id, summary);
        }
        let venue = venues.get(&booking.venue_id).cloned().flatten();
        games.push(JoinableGame { booking, venue });
    }

    Ok(games)
}

pub async fn list_user_bookings<S: BookingStore>(
    store: &S,
    actor: &AuthUser,
    open_only: bool,
) -> Result<Vec<Booking>, AppError> {
    store
        .list_user_bookings(actor.user_id, open_only)
        .await
        .map_err(|e| {
            tracing::error!(user_id = %actor.user_id, "failed to load user bookings: {e}");
            AppError::Load("Failed to load your bookings".into())
        })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::user::UserRole;
    use crate::store::memory::MemoryStore;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
    }

    fn morning_before() -> NaiveDateTime {
        date().and_hms_opt(5, 0, 0).unwrap()
    }

    fn slot(label: &str) -> SlotTime {
        SlotTime::parse(label).unwrap()
    }

    fn user(role: UserRole) -> AuthUser {
        AuthUser {
            user_id: Uuid::new_v4(),
            email: "player@example.com".into(),
            role,
        }
    }

    fn venue(opening: &str, closing: &str) -> Venue {
        Venue {
            id: Uuid::new_v4(),
            code: "abc".into(),
            title: "Riverside Turf".into(),
            image_url: "https://img/turf.jpg".into(),
            kind: "football".into(),
            opening_time: opening.into(),
            closing_time: closing.into(),
            owner_id: Uuid::new_v4(),
            assigned_host: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn setup() -> (MemoryStore, Venue) {
        let store = MemoryStore::new();
        let venue = venue("6:00 AM", "10:00 PM");
        store.add_venue(venue.clone());
        (store, venue)
    }

    fn request(slots: &[&str], open_slots: i32) -> BookingRequest {
        BookingRequest {
            date: date(),
            time_slots: slots.iter().map(|s| s.to_string()).collect(),
            open_slots,
        }
    }

    async fn book(
        store: &MemoryStore,
        actor: &AuthUser,
        venue: &Venue,
        slots: &[&str],
        open_slots: i32,
    ) -> Result<BookingConfirmation, AppError> {
        book_slots(store, Some(actor), venue.id, &request(slots, open_slots), today()).await
    }

    #[tokio::test]
    async fn existing_booking_marks_only_its_slot_taken() {
        let (store, venue) = setup();
        book(&store, &user(UserRole::User), &venue, &["6:00 AM"], 0)
            .await
            .unwrap();

        let slots = availability(&store, venue.id, date()).await.unwrap();
        assert_eq!(slots.len(), 16);
        assert_eq!(slots[0], SlotAvailability { time: slot("6:00 AM"), available: false });
        assert_eq!(slots.iter().filter(|s| s.available).count(), 15);

        let again = availability(&store, venue.id, date()).await.unwrap();
        assert_eq!(slots, again);
    }

    #[tokio::test]
    async fn other_dates_are_unaffected() {
        let (store, venue) = setup();
        book(&store, &user(UserRole::User), &venue, &["6:00 AM"], 0)
            .await
            .unwrap();

        let next_day = date().succ_opt().unwrap();
        let slots = availability(&store, venue.id, next_day).await.unwrap();
        assert!(slots.iter().all(|s| s.available));
    }

    #[tokio::test]
    async fn unparseable_venue_has_no_slots() {
        let store = MemoryStore::new();
        let broken = venue("sunrise", "10:00 PM");
        store.add_venue(broken.clone());

        assert!(availability(&store, broken.id, date()).await.unwrap().is_empty());

        store.failures.lock().unwrap().reads = true;
        assert!(check_availability(&store, &broken, date()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn read_failure_is_a_load_error() {
        let (store, venue) = setup();
        store.failures.lock().unwrap().reads = true;

        let err = check_availability(&store, &venue, date()).await.unwrap_err();
        assert!(matches!(err, AppError::Load(_)));
    }

    #[tokio::test]
    async fn unknown_venue_is_not_found() {
        let store = MemoryStore::new();
        let err = availability(&store, Uuid::new_v4(), date()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn booking_two_slots_with_open_seats() {
        let (store, venue) = setup();
        let actor = user(UserRole::User);

        let confirmation = book(&store, &actor, &venue, &["7:00 AM", "8:00 AM"], 3)
            .await
            .unwrap();
        assert_eq!(confirmation.slots_booked, 2);
        assert_eq!(confirmation.open_slots, Some(3));
        assert_eq!(
            confirmation.message,
            "Successfully booked 2 time slots for 2024-06-01 with 3 open slots"
        );

        let bookings = store.bookings();
        assert_eq!(bookings.len(), 2);
        assert!(bookings.iter().all(|b| b.open_slots == 3 && b.user_id == actor.user_id));

        let refreshed = confirmation.availability.unwrap();
        let taken: Vec<String> = refreshed
            .iter()
            .filter(|s| !s.available)
            .map(|s| s.time.to_string())
            .collect();
        assert_eq!(taken, ["7:00 AM", "8:00 AM"]);
    }

    #[tokio::test]
    async fn duplicate_labels_collapse_to_one_booking() {
        let (store, venue) = setup();
        let confirmation = book(&store, &user(UserRole::User), &venue, &["7:00 AM", "07:00 am"], 0)
            .await
            .unwrap();
        assert_eq!(confirmation.slots_booked, 1);
        assert_eq!(confirmation.open_slots, None);
        assert_eq!(confirmation.message, "Successfully booked 1 time slot for 2024-06-01");
    }

    #[tokio::test]
    async fn anonymous_booking_is_rejected_without_writes() {
        let (store, venue) = setup();
        let err = book_slots(&store, None, venue.id, &request(&["7:00 AM"], 0), today())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn host_cannot_book_own_assigned_venue() {
        let store = MemoryStore::new();
        let host = user(UserRole::Host);
        let mut assigned = venue("6:00 AM", "10:00 PM");
        assigned.assigned_host = Some(host.user_id);
        let other = venue("6:00 AM", "10:00 PM");
        store.add_venue(assigned.clone());
        store.add_venue(other.clone());

        let err = book(&store, &host, &assigned, &["7:00 AM"], 0).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert_eq!(store.write_count(), 0);

        book(&store, &host, &other, &["7:00 AM"], 0).await.unwrap();
    }

    #[tokio::test]
    async fn admin_assigned_to_venue_may_still_book_it() {
        let store = MemoryStore::new();
        let admin = user(UserRole::Admin);
        let mut assigned = venue("6:00 AM", "10:00 PM");
        assigned.assigned_host = Some(admin.user_id);
        store.add_venue(assigned.clone());

        book(&store, &admin, &assigned, &["7:00 AM"], 0).await.unwrap();
    }

    #[tokio::test]
    async fn selection_is_validated_before_writing() {
        let (store, venue) = setup();
        let actor = user(UserRole::User);

        let err = book(&store, &actor, &venue, &[], 0).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = book(&store, &actor, &venue, &["seven"], 0).await.unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));

        let err = book(&store, &actor, &venue, &["10:00 PM"], 0).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = book(&store, &actor, &venue, &["7:00 AM"], MAX_OPEN_SLOTS + 1)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let past = BookingRequest {
            date: today() - Duration::days(2),
            ..request(&["7:00 AM"], 0)
        };
        let err = book_slots(&store, Some(&actor), venue.id, &past, today())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn partial_failure_keeps_written_slots() {
        let (store, venue) = setup();
        store
            .failures
            .lock()
            .unwrap()
            .slot_writes
            .insert(slot("8:00 AM"));

        let err = book(&store, &user(UserRole::User), &venue, &["7:00 AM", "8:00 AM"], 0)
            .await
            .unwrap_err();
        match err {
            AppError::PartialWrite(msg) => {
                assert!(msg.contains("Booked 7:00 AM"));
                assert!(msg.contains("could not book 8:00 AM"));
            }
            other => panic!("expected partial write, got {other:?}"),
        }

        let bookings = store.bookings();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].time_slot, slot("7:00 AM"));
    }

    #[tokio::test]
    async fn losing_a_race_for_a_slot_is_a_conflict() {
        let (store, venue) = setup();
        book(&store, &user(UserRole::User), &venue, &["7:00 AM"], 0)
            .await
            .unwrap();

        let err = book(&store, &user(UserRole::User), &venue, &["7:00 AM"], 0)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(store.bookings().len(), 1);
    }

    async fn open_game(store: &MemoryStore, venue: &Venue, open_slots: i32) -> Uuid {
        book(store, &user(UserRole::User), venue, &["7:00 PM"], open_slots)
            .await
            .unwrap()
            .booking_ids[0]
    }

    #[tokio::test]
    async fn joining_consumes_open_seats() {
        let (store, venue) = setup();
        let game = open_game(&store, &venue, 3).await;
        let joiner = user(UserRole::User);

        let confirmation = join_open_slots(&store, Some(&joiner), game, 2, morning_before())
            .await
            .unwrap();
        assert_eq!(confirmation.joined_slots, 2);
        assert_eq!(confirmation.remaining_open_slots, 1);
        assert_eq!(store.booking(game).open_slots, 1);

        let joined = store.booking(confirmation.booking_id);
        assert_eq!(joined.user_id, joiner.user_id);
        assert_eq!(joined.original_booking_id, Some(game));
        assert_eq!(joined.joined_slots, Some(2));
        assert_eq!(joined.open_slots, 0);
        assert_eq!(joined.time_slot, slot("7:00 PM"));
    }

    #[tokio::test]
    async fn joining_more_than_open_is_rejected_before_writing() {
        let (store, venue) = setup();
        let game = open_game(&store, &venue, 3).await;
        let writes = store.write_count();

        let err = join_open_slots(&store, Some(&user(UserRole::User)), game, 4, morning_before())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidJoinCount { requested: 4, open: 3 }));

        let err = join_open_slots(&store, Some(&user(UserRole::User)), game, 0, morning_before())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidJoinCount { requested: 0, .. }));

        assert_eq!(store.write_count(), writes);
        assert_eq!(store.booking(game).open_slots, 3);
    }

    #[tokio::test]
    async fn joining_requires_login_and_a_future_game() {
        let (store, venue) = setup();
        let game = open_game(&store, &venue, 3).await;

        let err = join_open_slots(&store, None, game, 1, morning_before())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));

        let late = date().and_hms_opt(19, 30, 0).unwrap();
        let err = join_open_slots(&store, Some(&user(UserRole::User)), game, 1, late)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn failed_join_record_leaves_seats_consumed() {
        let (store, venue) = setup();
        let game = open_game(&store, &venue, 3).await;
        store.failures.lock().unwrap().join_writes = true;

        let err = join_open_slots(&store, Some(&user(UserRole::User)), game, 2, morning_before())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PartialWrite(_)));
        assert_eq!(store.booking(game).open_slots, 1);
        assert_eq!(store.bookings().len(), 1);
    }

    #[tokio::test]
    async fn joinable_games_are_future_and_soonest_first() {
        let (store, venue) = setup();
        let host_user = user(UserRole::User);
        book(&store, &host_user, &venue, &["9:00 PM"], 2).await.unwrap();
        book(&store, &host_user, &venue, &["6:00 AM"], 1).await.unwrap();
        book(&store, &host_user, &venue, &["2:00 PM"], 4).await.unwrap();
        book(&store, &host_user, &venue, &["3:00 PM"], 0).await.unwrap();

        let now = date().and_hms_opt(7, 0, 0).unwrap();
        let games = list_joinable_games(&store, now).await.unwrap();
        let times: Vec<String> = games.iter().map(|g| g.booking.time_slot.to_string()).collect();
        assert_eq!(times, ["2:00 PM", "9:00 PM"]);
        assert_eq!(games[0].venue.as_ref().unwrap().title, "Riverside Turf");
    }

    #[tokio::test]
    async fn game_keeps_listing_when_venue_lookup_fails() {
        let (store, venue) = setup();
        book(&store, &user(UserRole::User), &venue, &["9:00 PM"], 2)
            .await
            .unwrap();
        store.failures.lock().unwrap().venues.insert(venue.id);

        let games = list_joinable_games(&store, morning_before()).await.unwrap();
        assert_eq!(games.len(), 1);
        assert!(games[0].venue.is_none());
    }

    #[tokio::test]
    async fn joined_game_drops_off_listing_when_full() {
        let (store, venue) = setup();
        let game = open_game(&store, &venue, 2).await;
        join_open_slots(&store, Some(&user(UserRole::User)), game, 2, morning_before())
            .await
            .unwrap();

        assert!(list_joinable_games(&store, morning_before()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn user_bookings_filter_open_only() {
        let (store, venue) = setup();
        let actor = user(UserRole::User);
        book(&store, &actor, &venue, &["7:00 AM"], 0).await.unwrap();
        book(&store, &actor, &venue, &["9:00 AM"], 2).await.unwrap();
        book(&store, &user(UserRole::User), &venue, &["10:00 AM"], 2).await.unwrap();

        let all = list_user_bookings(&store, &actor, false).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].time_slot, slot("9:00 AM"));

        let open = list_user_bookings(&store, &actor, true).await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].open_slots, 2);
    }
}
