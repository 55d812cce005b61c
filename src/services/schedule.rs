use std::time::Duration;

use chrono::Utc;
use moka::future::Cache;
use sqlx::SqliteConnection;

use crate::config::Config;
use crate::database::models::{Shift, ShiftInput, ShiftRemoval, UpdateShiftInput};
use crate::database::repositories::{LocationRepository, ShiftRepository, UserRepository};
use crate::error::{AppError, AppResult};
use crate::scheduling::generator::candidate_span;
use crate::scheduling::{
    RemovalPlan, TimeRange, find_conflict, generation_key, plan_location_shifts, plan_removal,
};

/// Shift persistence with the scheduling rules applied: per-user overlap is
/// checked inside the write transaction, empty location ranges are filled by
/// the generator once per cache key.
#[derive(Clone)]
pub struct ScheduleService {
    shifts: ShiftRepository,
    users: UserRepository,
    locations: LocationRepository,
    generated: Cache<String, ()>,
    generate_shifts: bool,
}

impl ScheduleService {
    pub fn new(
        config: &Config,
        shifts: ShiftRepository,
        users: UserRepository,
        locations: LocationRepository,
    ) -> Self {
        let generated = Cache::builder()
            .max_capacity(config.generation_cache_capacity)
            .time_to_live(Duration::from_secs(config.generation_cache_ttl_secs))
            .build();

        Self {
            shifts,
            users,
            locations,
            generated,
            generate_shifts: config.generate_shifts,
        }
    }

    pub async fn get_shift(&self, id: &str) -> AppResult<Shift> {
        self.shifts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Shift {}", id)))
    }

    pub async fn create_shift(&self, input: ShiftInput, creator_id: &str) -> AppResult<Shift> {
        let range = input.range()?;
        self.ensure_references(&input.user_id, input.location_id.as_deref())
            .await?;

        let shift = input.into_shift(creator_id);

        let mut tx = self.shifts.begin().await?;
        if ShiftRepository::find_by_id_in(&mut tx, &shift.id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Shift {} already exists",
                shift.id
            )));
        }
        ensure_no_conflict(&mut tx, &shift.user_id, &range, None).await?;
        ShiftRepository::insert(&mut tx, &shift).await?;
        tx.commit().await?;

        log::info!(
            "Created shift {} for user {} ({} - {})",
            shift.id,
            shift.user_id,
            shift.start_time,
            shift.end_time
        );
        Ok(shift)
    }

    pub async fn update_shift(&self, input: UpdateShiftInput) -> AppResult<Shift> {
        let range = input.range()?;
        self.ensure_references(&input.user_id, input.location_id.as_deref())
            .await?;

        let mut tx = self.shifts.begin().await?;
        let mut shift = ShiftRepository::find_by_id_in(&mut tx, &input.id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Shift {}", input.id)))?;

        ensure_no_conflict(&mut tx, &input.user_id, &range, Some(&input.id)).await?;
        input.apply_to(&mut shift);
        ShiftRepository::update(&mut tx, &shift).await?;
        tx.commit().await?;

        log::info!("Updated shift {}", shift.id);
        Ok(shift)
    }

    pub async fn delete_shift(&self, id: &str) -> AppResult<Shift> {
        let mut tx = self.shifts.begin().await?;
        let shift = ShiftRepository::find_by_id_in(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Shift {}", id)))?;
        ShiftRepository::delete(&mut tx, id).await?;
        tx.commit().await?;

        if let Some(location_id) = &shift.location_id {
            self.invalidate_location(location_id).await;
        }

        log::info!("Deleted shift {}", id);
        Ok(shift)
    }

    /// Cut `window` out of a shift, replacing it by the parts that remain.
    pub async fn remove_range(&self, id: &str, window: TimeRange) -> AppResult<ShiftRemoval> {
        let mut tx = self.shifts.begin().await?;
        let shift = ShiftRepository::find_by_id_in(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Shift {}", id)))?;

        let removal = match plan_removal(&shift, &window, Utc::now()) {
            RemovalPlan::Untouched => return Ok(ShiftRemoval::Untouched { shift }),
            RemovalPlan::Remove => {
                ShiftRepository::delete(&mut tx, id).await?;
                ShiftRemoval::Removed { id: id.to_string() }
            }
            RemovalPlan::Split(segments) => {
                ShiftRepository::delete(&mut tx, id).await?;
                for segment in &segments {
                    if ShiftRepository::find_by_id_in(&mut tx, &segment.id)
                        .await?
                        .is_some()
                    {
                        return Err(AppError::Conflict(format!(
                            "Shift {} already exists",
                            segment.id
                        )));
                    }
                    ensure_no_conflict(&mut tx, &segment.user_id, &segment.range(), None).await?;
                    ShiftRepository::insert(&mut tx, segment).await?;
                }
                ShiftRemoval::Split {
                    removed_id: id.to_string(),
                    segments,
                }
            }
        };
        tx.commit().await?;

        if let Some(location_id) = &shift.location_id {
            self.invalidate_location(location_id).await;
        }

        log::info!("Removed {} - {} from shift {}", window.start, window.end, id);
        Ok(removal)
    }

    pub async fn shifts_for_user(&self, user_id: &str, window: TimeRange) -> AppResult<Vec<Shift>> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AppError::not_found(format!("User {}", user_id)));
        }
        Ok(self.shifts.find_by_user_within(user_id, &window).await?)
    }

    /// Shifts of a location inside `window`. An empty range that has not been
    /// generated before is filled by the generator first.
    pub async fn shifts_for_location(
        &self,
        location_id: &str,
        window: TimeRange,
    ) -> AppResult<Vec<Shift>> {
        if !self.locations.exists(location_id).await? {
            return Err(AppError::not_found(format!("Location {}", location_id)));
        }

        let stored = self
            .shifts
            .find_by_location_within(location_id, &window)
            .await?;
        if !stored.is_empty() || !self.generate_shifts {
            return Ok(stored);
        }

        let key = generation_key(location_id, &window);
        if self.generated.contains_key(&key) {
            log::debug!("Range {} already generated", key);
            return Ok(stored);
        }

        let inserted = self.generate_for_location(location_id, &window).await?;
        self.generated.insert(key.clone(), ()).await;
        log::info!("Generated {} shift(s) for {}", inserted, key);

        Ok(self
            .shifts
            .find_by_location_within(location_id, &window)
            .await?)
    }

    async fn generate_for_location(&self, location_id: &str, window: &TimeRange) -> AppResult<usize> {
        let roster = self.users.get_user_ids().await?;

        let mut tx = self.shifts.begin().await?;
        let existing = ShiftRepository::find_intersecting(&mut tx, &candidate_span(window)).await?;
        let plan = plan_location_shifts(location_id, window, &roster, &existing);

        // keep only what the range query can return
        let now = Utc::now();
        let mut inserted = 0;
        for planned in plan.into_iter().filter(|p| window.contains(&p.range)) {
            // Ids are deterministic; a stored shift may already carry one
            if ShiftRepository::find_by_id_in(&mut tx, &planned.id)
                .await?
                .is_some()
            {
                continue;
            }
            ShiftRepository::insert(&mut tx, &planned.into_shift(now)).await?;
            inserted += 1;
        }
        tx.commit().await?;

        Ok(inserted)
    }

    /// Delete a user together with all of their shifts.
    pub async fn delete_user_with_shifts(&self, user_id: &str) -> AppResult<()> {
        let mut tx = self.shifts.begin().await?;
        let locations = ShiftRepository::delete_by_user(&mut tx, user_id).await?;
        if !UserRepository::delete_user(&mut tx, user_id).await? {
            return Err(AppError::not_found(format!("User {}", user_id)));
        }
        tx.commit().await?;

        for location_id in &locations {
            self.invalidate_location(location_id).await;
        }

        log::info!("Deleted user {}", user_id);
        Ok(())
    }

    /// Delete a location together with all shifts scheduled there.
    pub async fn delete_location_with_shifts(&self, location_id: &str) -> AppResult<u64> {
        let mut tx = self.shifts.begin().await?;
        let removed = ShiftRepository::delete_by_location(&mut tx, location_id).await?;
        if !LocationRepository::delete_location(&mut tx, location_id).await? {
            return Err(AppError::not_found(format!("Location {}", location_id)));
        }
        tx.commit().await?;

        self.invalidate_location(location_id).await;

        log::info!("Deleted location {} and {} shift(s)", location_id, removed);
        Ok(removed)
    }

    /// Forget every generated range of a location.
    pub async fn invalidate_location(&self, location_id: &str) {
        let prefix = format!("{}-", location_id);
        let keys: Vec<String> = self
            .generated
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .map(|(key, _)| key.to_string())
            .collect();

        for key in &keys {
            self.generated.invalidate(key).await;
        }
        if !keys.is_empty() {
            log::debug!("Invalidated {} generated range(s) of {}", keys.len(), location_id);
        }
    }

    pub fn is_generated(&self, key: &str) -> bool {
        self.generated.contains_key(key)
    }

    async fn ensure_references(&self, user_id: &str, location_id: Option<&str>) -> AppResult<()> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AppError::BadRequest(format!("User {} does not exist", user_id)));
        }
        if let Some(location_id) = location_id {
            if !self.locations.exists(location_id).await? {
                return Err(AppError::BadRequest(format!(
                    "Location {} does not exist",
                    location_id
                )));
            }
        }
        Ok(())
    }
}

async fn ensure_no_conflict(
    conn: &mut SqliteConnection,
    user_id: &str,
    range: &TimeRange,
    exclude_id: Option<&str>,
) -> AppResult<()> {
    let existing = ShiftRepository::find_user_intersecting(conn, user_id, range).await?;
    match find_conflict(user_id, range, exclude_id, &existing) {
        Some(conflict) => Err(AppError::Conflict(format!(
            "User {} already has shift {} from {} to {}",
            user_id, conflict.id, conflict.start_time, conflict.end_time
        ))),
        None => Ok(()),
    }
}
