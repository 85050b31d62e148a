//! Cafe directory controller
//!
//! The single owner of the directory and the eligibility gate. Every mutation
//! goes through `&mut self`, so the read-modify-write of a cafe's running mean
//! cannot interleave with another submission.

use tracing::{info, instrument, warn};

use crate::aggregator;
use crate::clock::Clock;
use crate::config::{ConfigError, DirectoryConfig};
use crate::eligibility::{Eligibility, EligibilityGate};
use crate::error::{Error, Result};
use crate::invariants::{assert_cafe_invariants, assert_mean_matches_history};
use crate::models::{Cafe, CafeId, NewCafe, ReviewDraft, SchemaVersion, Submission};
use crate::search;
use crate::storage::{DirectoryRepository, LocalStorage};

pub struct CafeDirectory<R, S, C> {
    repo: R,
    gate: EligibilityGate<S>,
    clock: C,
    schema: SchemaVersion,
}

impl<R, S, C> CafeDirectory<R, S, C>
where
    R: DirectoryRepository,
    S: LocalStorage,
    C: Clock,
{
    pub fn new(repo: R, gate: EligibilityGate<S>, clock: C) -> Self {
        Self {
            repo,
            gate,
            clock,
            schema: SchemaVersion::CURRENT,
        }
    }

    /// Build a directory from configuration and seed its cafes
    pub fn from_config(
        repo: R,
        storage: S,
        clock: C,
        config: &DirectoryConfig,
    ) -> std::result::Result<Self, ConfigError> {
        let gate = EligibilityGate::with_cooldown(storage, config.cooldown());
        let mut directory = Self::new(repo, gate, clock).with_schema(config.ratings.schema);

        for seed in &config.cafes {
            let id = directory
                .repo
                .next_cafe_id()
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
            let cafe = seed.to_cafe(id)?;
            directory
                .seed(cafe)
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        }
        Ok(directory)
    }

    pub fn with_schema(mut self, schema: SchemaVersion) -> Self {
        self.schema = schema;
        self
    }

    /// Category set offered to new submissions
    pub fn schema(&self) -> SchemaVersion {
        self.schema
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn gate(&self) -> &EligibilityGate<S> {
        &self.gate
    }

    /// Insert a pre-built cafe (startup seeding)
    pub fn seed(&mut self, cafe: Cafe) -> Result<()> {
        assert_cafe_invariants(&cafe);
        info!(cafe_id = %cafe.id, name = %cafe.name, "Seeded cafe");
        self.repo.insert_cafe(cafe)
    }

    /// Add a new listing from the add-cafe form
    #[instrument(skip(self, listing), fields(name = %listing.name))]
    pub fn add_cafe(&mut self, listing: NewCafe) -> Result<Cafe> {
        let listing = listing.validate()?;
        let id = self.repo.next_cafe_id()?;
        let cafe = Cafe::new(id, listing);
        assert_cafe_invariants(&cafe);

        self.repo.insert_cafe(cafe.clone())?;
        info!(cafe_id = %cafe.id, "Added cafe");
        Ok(cafe)
    }

    /// Submit a rating for a cafe
    ///
    /// Fails without touching any state when the cafe is unknown, this device
    /// rated it inside the cooldown window, a score is out of range, or a
    /// category is not offered by the directory's schema.
    #[instrument(skip(self, draft))]
    pub fn submit_rating(&mut self, cafe_id: CafeId, draft: ReviewDraft) -> Result<Cafe> {
        let cafe = self.require(cafe_id)?;
        let now = self.clock.now();

        if let Eligibility::Denied { next_eligible, .. } = self.gate.check(cafe_id, now)? {
            warn!(%cafe_id, %next_eligible, "Rating rejected, cooldown active");
            return Err(Error::EligibilityDenied {
                cafe_id,
                next_eligible,
            });
        }

        self.check_schema(&draft.submission)?;
        let updated = aggregator::fold_submission(&cafe, draft, now)?;
        assert_cafe_invariants(&updated);
        assert_mean_matches_history(&updated);

        // The cooldown is only recorded once the rating has been stored.
        self.repo.update_cafe(updated.clone())?;
        self.gate.record_submission(cafe_id, now)?;

        info!(
            %cafe_id,
            rating = updated.rating,
            rating_count = updated.rating_count,
            "Rating accepted"
        );
        Ok(updated)
    }

    /// Whether this device may rate the cafe right now
    pub fn eligibility(&self, cafe_id: CafeId) -> Result<Eligibility> {
        self.require(cafe_id)?;
        self.gate.check(cafe_id, self.clock.now())
    }

    pub fn cafe(&self, cafe_id: CafeId) -> Result<Option<Cafe>> {
        self.repo.find_cafe(cafe_id)
    }

    pub fn cafes(&self) -> Result<Vec<Cafe>> {
        self.repo.list_cafes()
    }

    /// Cafes matching a free-text query, in directory order
    pub fn search(&self, query: &str) -> Result<Vec<Cafe>> {
        let cafes = self.repo.list_cafes()?;
        Ok(search::filter(&cafes, query).into_iter().cloned().collect())
    }

    fn check_schema(&self, submission: &Submission) -> Result<()> {
        let Submission::Categories(rating) = submission else {
            return Ok(());
        };
        match rating.iter().find(|(c, _)| !self.schema.contains(*c)) {
            Some((category, _)) => Err(Error::InvalidInput(format!(
                "{} is not rated in schema v{}",
                category.label(),
                u8::from(self.schema)
            ))),
            None => Ok(()),
        }
    }

    fn require(&self, cafe_id: CafeId) -> Result<Cafe> {
        self.repo
            .find_cafe(cafe_id)?
            .ok_or_else(|| Error::NotFound(format!("Cafe {}", cafe_id)))
    }
}
