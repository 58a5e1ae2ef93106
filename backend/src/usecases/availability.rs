use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::Arc,
};

use chrono::{Duration, NaiveDate, Utc};
use crates::domain::{
    entities::{
        availability_blocks::{AvailabilityBlockEntity, InsertAvailabilityBlockEntity},
        time_slots::TimeSlotEntity,
    },
    repositories::{
        availability_blocks::AvailabilityBlockRepository, bookings::BookingRepository,
        time_slots::TimeSlotRepository,
    },
    value_objects::{
        availability::{
            AvailabilityResult, CandidateWindow, CreateAvailabilityBlockRequest, DayAvailability,
            ExistingSlot, ListAvailabilityBlocksQuery, MAX_DAILY_DJ_BOOKINGS, PHOTOBOOTH_UNITS,
            days_in_month, evaluate_dj, evaluate_photobooth,
        },
        bookings::CheckAvailabilityRequest,
        enums::service_families::ServiceFamily,
        time_of_day::{Minutes, parse_time},
    },
};
use tracing::{error, info, warn};
use uuid::Uuid;

use super::error::{BookingError, UseCaseResult};

const DEFAULT_BLOCK_LOOKAHEAD_DAYS: i64 = 365;

/// Trimmed, lowercased provider key; empty input is a validation error.
pub(crate) fn normalize_provider(raw: &str) -> UseCaseResult<String> {
    let provider = raw.trim().to_ascii_lowercase();
    if provider.is_empty() {
        return Err(BookingError::Validation("provider is required".to_string()));
    }
    Ok(provider)
}

pub(crate) fn parse_time_field(field: &str, raw: &str) -> UseCaseResult<Minutes> {
    parse_time(raw).ok_or_else(|| {
        BookingError::Validation(format!("{} must be formatted as HH:MM", field))
    })
}

fn max_bookings_for(family: ServiceFamily) -> i64 {
    match family {
        ServiceFamily::Dj => MAX_DAILY_DJ_BOOKINGS,
        ServiceFamily::Photobooth => PHOTOBOOTH_UNITS,
    }
}

/// Slots with unparseable stored times are skipped rather than failing the
/// whole check; every write path normalizes times before insert.
fn existing_slots(slots: &[TimeSlotEntity]) -> Vec<ExistingSlot> {
    slots
        .iter()
        .filter_map(|slot| match (parse_time(&slot.start_time), parse_time(&slot.end_time)) {
            (Some(start), Some(end)) => Some(ExistingSlot { start, end }),
            _ => {
                warn!(
                    slot_id = %slot.id,
                    start_time = %slot.start_time,
                    end_time = %slot.end_time,
                    "availability: skipping slot with malformed stored time"
                );
                None
            }
        })
        .collect()
}

enum MonthOccupancy {
    Photobooth(HashMap<NaiveDate, i64>),
    Dj(HashMap<NaiveDate, Vec<ExistingSlot>>),
}

impl MonthOccupancy {
    fn cell(&self, day: NaiveDate) -> DayAvailability {
        match self {
            MonthOccupancy::Photobooth(counts) => {
                DayAvailability::photobooth(counts.get(&day).copied().unwrap_or(0))
            }
            MonthOccupancy::Dj(slots) => {
                DayAvailability::dj(slots.get(&day).map(Vec::as_slice).unwrap_or(&[]))
            }
        }
    }
}

pub struct AvailabilityUseCase<A, S, B>
where
    A: AvailabilityBlockRepository + Send + Sync + 'static,
    S: TimeSlotRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
{
    block_repo: Arc<A>,
    slot_repo: Arc<S>,
    booking_repo: Arc<B>,
}

impl<A, S, B> AvailabilityUseCase<A, S, B>
where
    A: AvailabilityBlockRepository + Send + Sync + 'static,
    S: TimeSlotRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
{
    pub fn new(block_repo: Arc<A>, slot_repo: Arc<S>, booking_repo: Arc<B>) -> Self {
        Self {
            block_repo,
            slot_repo,
            booking_repo,
        }
    }

    pub async fn check_availability(
        &self,
        request: CheckAvailabilityRequest,
    ) -> UseCaseResult<AvailabilityResult> {
        let provider = normalize_provider(&request.provider)?;

        let start = match request.start_time.as_deref() {
            Some(raw) => parse_time_field("startTime", raw)?,
            None => 0,
        };
        let end = match request.end_time.as_deref() {
            Some(raw) => parse_time_field("endTime", raw)?,
            None => 0,
        };

        self.evaluate(&provider, request.date, CandidateWindow { start, end })
            .await
    }

    /// Runs the availability rules for one provider and date. Manual blocks are
    /// consulted first, then the family-specific capacity rule.
    pub async fn evaluate(
        &self,
        provider: &str,
        date: NaiveDate,
        window: CandidateWindow,
    ) -> UseCaseResult<AvailabilityResult> {
        let family = ServiceFamily::of_provider(provider);

        let block = self
            .block_repo
            .find_block(provider, date)
            .await
            .map_err(|err| {
                error!(provider, %date, db_error = ?err, "availability: failed to load manual block");
                BookingError::Internal(err)
            })?;

        if block.is_some() {
            info!(provider, %date, "availability: date manually blocked");
            return Ok(AvailabilityResult::manually_blocked(max_bookings_for(family)));
        }

        let result = match family {
            ServiceFamily::Photobooth => {
                let active = self
                    .booking_repo
                    .count_active_photobooth_bookings(date)
                    .await
                    .map_err(|err| {
                        error!(%date, db_error = ?err, "availability: failed to count photobooth bookings");
                        BookingError::Internal(err)
                    })?;
                evaluate_photobooth(active)
            }
            ServiceFamily::Dj => {
                let slots = self
                    .slot_repo
                    .list_confirmed_slots(provider, date)
                    .await
                    .map_err(|err| {
                        error!(provider, %date, db_error = ?err, "availability: failed to load time slots");
                        BookingError::Internal(err)
                    })?;
                evaluate_dj(&existing_slots(&slots), window)
            }
        };

        info!(
            provider,
            %date,
            available = result.available,
            bookings_count = result.bookings_count,
            reason = ?result.reason,
            "availability: evaluated"
        );

        Ok(result)
    }

    pub async fn month_overview(
        &self,
        provider: &str,
        year: i32,
        month: u32,
    ) -> UseCaseResult<BTreeMap<String, DayAvailability>> {
        let provider = normalize_provider(provider)?;
        let days = days_in_month(year, month).ok_or_else(|| {
            BookingError::Validation(format!("invalid year/month: {}/{}", year, month))
        })?;
        let (Some(first), Some(last)) = (days.first().copied(), days.last().copied()) else {
            return Ok(BTreeMap::new());
        };

        let family = ServiceFamily::of_provider(&provider);
        let capacity = max_bookings_for(family);

        let blocked: HashSet<NaiveDate> = self
            .block_repo
            .list_blocks(&provider, first, last)
            .await
            .map_err(|err| {
                error!(provider = %provider, year, month, db_error = ?err, "availability: failed to load blocks for month");
                BookingError::Internal(err)
            })?
            .into_iter()
            .map(|block| block.block_date)
            .collect();

        let occupancy = match family {
            ServiceFamily::Photobooth => {
                let counts = self
                    .booking_repo
                    .count_active_photobooth_bookings_between(first, last)
                    .await
                    .map_err(|err| {
                        error!(year, month, db_error = ?err, "availability: failed to count photobooth bookings for month");
                        BookingError::Internal(err)
                    })?;
                MonthOccupancy::Photobooth(counts.into_iter().collect())
            }
            ServiceFamily::Dj => {
                let slots = self
                    .slot_repo
                    .list_confirmed_slots_between(&provider, first, last)
                    .await
                    .map_err(|err| {
                        error!(provider = %provider, year, month, db_error = ?err, "availability: failed to load slots for month");
                        BookingError::Internal(err)
                    })?;
                let mut by_day: HashMap<NaiveDate, Vec<TimeSlotEntity>> = HashMap::new();
                for slot in slots {
                    by_day.entry(slot.event_date).or_default().push(slot);
                }
                MonthOccupancy::Dj(
                    by_day
                        .into_iter()
                        .map(|(day, slots)| (day, existing_slots(&slots)))
                        .collect(),
                )
            }
        };

        let overview = days
            .into_iter()
            .map(|day| {
                let cell = if blocked.contains(&day) {
                    DayAvailability::blocked(capacity)
                } else {
                    occupancy.cell(day)
                };
                (day.format("%Y-%m-%d").to_string(), cell)
            })
            .collect::<BTreeMap<_, _>>();

        info!(provider = %provider, year, month, days = overview.len(), "availability: month overview built");
        Ok(overview)
    }

    /// Blocking an already blocked date returns the existing block's id.
    pub async fn create_block(&self, request: CreateAvailabilityBlockRequest) -> UseCaseResult<Uuid> {
        let provider = normalize_provider(&request.provider)?;
        let date = request.date;

        if let Some(existing) = self
            .block_repo
            .find_block(&provider, date)
            .await
            .map_err(BookingError::Internal)?
        {
            info!(provider = %provider, %date, block_id = %existing.id, "availability: block already exists");
            return Ok(existing.id);
        }

        let reason = request
            .reason
            .map(|reason| reason.trim().to_string())
            .filter(|reason| !reason.is_empty());

        let block_id = self
            .block_repo
            .create_block(InsertAvailabilityBlockEntity {
                service_provider: provider.clone(),
                block_date: date,
                reason,
            })
            .await
            .map_err(|err| {
                error!(provider = %provider, %date, db_error = ?err, "availability: failed to create block");
                BookingError::Internal(err)
            })?;

        info!(provider = %provider, %date, %block_id, "availability: block created");
        Ok(block_id)
    }

    pub async fn list_blocks(
        &self,
        provider: &str,
        query: ListAvailabilityBlocksQuery,
    ) -> UseCaseResult<Vec<AvailabilityBlockEntity>> {
        let provider = normalize_provider(provider)?;
        let from = query.from.unwrap_or_else(|| Utc::now().date_naive());
        let to = query
            .to
            .unwrap_or_else(|| from + Duration::days(DEFAULT_BLOCK_LOOKAHEAD_DAYS));

        if to < from {
            return Err(BookingError::Validation(
                "`to` must not be before `from`".to_string(),
            ));
        }

        self.block_repo
            .list_blocks(&provider, from, to)
            .await
            .map_err(|err| {
                error!(provider = %provider, %from, %to, db_error = ?err, "availability: failed to list blocks");
                BookingError::Internal(err)
            })
    }

    pub async fn delete_block(&self, block_id: Uuid) -> UseCaseResult<()> {
        let deleted = self
            .block_repo
            .delete_block(block_id)
            .await
            .map_err(|err| {
                error!(%block_id, db_error = ?err, "availability: failed to delete block");
                BookingError::Internal(err)
            })?;

        if !deleted {
            warn!(%block_id, "availability: block to delete not found");
            return Err(BookingError::NotFound("availability block"));
        }

        info!(%block_id, "availability: block deleted");
        Ok(())
    }
}
