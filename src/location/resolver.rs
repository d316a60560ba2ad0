//! Cascading Province → District → Ward resolver.
//!
//! The resolver is a synchronous state machine that never performs I/O
//! itself. Every operation that needs a tier list hands back a
//! [`FetchTicket`]; whoever owns the resolver runs the lookup (inline via
//! [`LocationResolver::settle`], or on a spawned task) and feeds the result
//! back through [`LocationResolver::apply`].
//!
//! Each tier keeps a monotonically increasing ticket sequence. Only the
//! latest ticket issued for a tier may change that tier's options, so a
//! slow response for a province the user already moved away from is
//! dropped on arrival.

use tracing::{debug, info, warn};

use crate::location::{
    client::LocationLookup,
    errors::{LocationError, LocationResult},
    types::{LocationNames, LocationValue, Region, Selection, Tier},
};

/// Request for one tier's option list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub tier: Tier,
    /// Code of the selected parent region; `None` for provinces
    pub parent: Option<String>,
    pub seq: u64,
}

/// What the caller has to do after an operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Step {
    /// Lookup to run next
    pub fetch: Option<FetchTicket>,
    /// Value to write into the host form; the picker closes when set
    pub publish: Option<LocationValue>,
}

impl Step {
    pub fn fetching(ticket: FetchTicket) -> Self {
        Self {
            fetch: Some(ticket),
            publish: None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.fetch.is_none() && self.publish.is_none()
    }
}

/// Where a restore is in its walk down the tiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreProgress {
    pub names: LocationNames,
    /// The tier whose option list the restore is waiting on
    pub awaiting: Tier,
}

/// Lifecycle of a resolver.
///
/// `Empty` → `Restoring` → `Interactive`, or `Empty` → `Interactive` when
/// the user picks something before any restore. There is no way back to
/// `Empty`, which is what makes restore run at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverPhase {
    Empty,
    Restoring(RestoreProgress),
    Interactive,
}

#[derive(Debug, Default)]
struct TierSlot {
    options: Vec<Region>,
    /// Last sequence number handed out
    issued: u64,
    /// Sequence of the ticket whose response is still wanted
    pending: Option<u64>,
    loaded: bool,
}

impl TierSlot {
    fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.pending = Some(self.issued);
        self.issued
    }

    fn invalidate(&mut self) {
        self.options.clear();
        self.pending = None;
        self.loaded = false;
    }

    fn contains(&self, region: &Region) -> bool {
        self.options.iter().any(|option| option.code == region.code)
    }
}

/// Three-level dependent selection bound to one form
#[derive(Debug)]
pub struct LocationResolver {
    phase: ResolverPhase,
    selection: Selection,
    slots: [TierSlot; 3],
}

impl Default for LocationResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationResolver {
    pub fn new() -> Self {
        Self {
            phase: ResolverPhase::Empty,
            selection: Selection::default(),
            slots: Default::default(),
        }
    }

    pub fn phase(&self) -> &ResolverPhase {
        &self.phase
    }

    pub fn is_restoring(&self) -> bool {
        matches!(self.phase, ResolverPhase::Restoring(_))
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_complete(&self) -> bool {
        self.selection.is_complete()
    }

    /// Options currently offered for a tier
    pub fn options(&self, tier: Tier) -> &[Region] {
        &self.slot(tier).options
    }

    pub fn is_loading(&self, tier: Tier) -> bool {
        self.slot(tier).pending.is_some()
    }

    /// Whether `apply` would accept a result for this ticket
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.slot(ticket.tier).pending == Some(ticket.seq)
    }

    /// A tier can be chosen from once its parent is selected and its list
    /// holds at least one option
    pub fn is_enabled(&self, tier: Tier) -> bool {
        let parent_ready = match tier.parent() {
            Some(parent) => self.selection.get(parent).is_some(),
            None => true,
        };
        parent_ready && !self.slot(tier).options.is_empty()
    }

    fn slot(&self, tier: Tier) -> &TierSlot {
        &self.slots[tier.index()]
    }

    fn slot_mut(&mut self, tier: Tier) -> &mut TierSlot {
        &mut self.slots[tier.index()]
    }

    fn issue(&mut self, tier: Tier, parent: Option<String>) -> FetchTicket {
        let seq = self.slot_mut(tier).issue();
        debug!("Issued {} lookup #{} (parent: {:?})", tier, seq, parent);
        FetchTicket { tier, parent, seq }
    }

    /// Drop the option lists of every tier below `tier`, together with any
    /// response still in flight for them
    fn invalidate_below(&mut self, tier: Tier) {
        let mut next = tier.child();
        while let Some(child) = next {
            self.slot_mut(child).invalidate();
            next = child.child();
        }
    }

    /// Start (or restart) the province lookup
    pub fn load_provinces(&mut self) -> FetchTicket {
        self.issue(Tier::Province, None)
    }

    /// Restore a previously saved `"{province}_{district}_{ward}"` value.
    ///
    /// Runs once per resolver. Names are matched against freshly loaded
    /// lists top-down; the first name that cannot be found ends the restore
    /// and leaves lower tiers unset.
    pub fn restore(&mut self, serialized: &str) -> Step {
        if self.phase != ResolverPhase::Empty {
            debug!("Restore skipped: resolver already {:?}", self.phase);
            return Step::default();
        }

        let Some(names) = LocationNames::parse(serialized) else {
            debug!("Nothing to restore from {:?}", serialized);
            return Step::default();
        };

        info!("Restoring location {:?}", serialized);
        self.phase = ResolverPhase::Restoring(RestoreProgress {
            names,
            awaiting: Tier::Province,
        });

        let provinces = self.slot(Tier::Province);
        if provinces.pending.is_some() {
            // The in-flight province lookup resumes the restore
            Step::default()
        } else if provinces.loaded {
            self.resume_restore()
        } else {
            Step::fetching(self.load_provinces())
        }
    }

    /// Match the awaited tier's name against its freshly loaded list
    fn resume_restore(&mut self) -> Step {
        let ResolverPhase::Restoring(progress) = &self.phase else {
            return Step::default();
        };
        let tier = progress.awaiting;
        let Some(name) = progress.names.get(tier).map(str::to_string) else {
            return self.finish_restore();
        };
        let has_more = tier
            .child()
            .map_or(false, |child| progress.names.get(child).is_some());

        let found = self
            .slot(tier)
            .options
            .iter()
            .find(|option| option.name.trim() == name)
            .cloned();

        let Some(region) = found else {
            debug!("Restore stopped: no {} named {:?}", tier, name);
            return self.finish_restore();
        };

        self.selection.set(tier, Some(region.clone()));
        self.invalidate_below(tier);

        let Some(child) = tier.child() else {
            return self.finish_restore();
        };
        let ticket = self.issue(child, Some(region.code));

        if has_more {
            if let ResolverPhase::Restoring(progress) = &mut self.phase {
                progress.awaiting = child;
            }
            Step::fetching(ticket)
        } else {
            let mut step = self.finish_restore();
            step.fetch = Some(ticket);
            step
        }
    }

    fn finish_restore(&mut self) -> Step {
        self.phase = ResolverPhase::Interactive;
        let publish = self.selection.location_value();
        match &publish {
            Some(value) => info!("Restored location: {}", value.label),
            None => debug!("Restore finished with a partial selection"),
        }
        Step {
            fetch: None,
            publish,
        }
    }

    /// Deliver the outcome of a lookup. Responses to superseded tickets are
    /// discarded. A failed lookup leaves the tier empty, which disables it.
    pub fn apply(
        &mut self,
        ticket: &FetchTicket,
        result: LocationResult<Vec<Region>>,
    ) -> Step {
        if !self.is_current(ticket) {
            debug!(
                "Discarding stale {} lookup #{} (waiting on {:?})",
                ticket.tier,
                ticket.seq,
                self.slot(ticket.tier).pending
            );
            return Step::default();
        }

        let slot = self.slot_mut(ticket.tier);
        slot.pending = None;
        slot.loaded = true;
        match result {
            Ok(options) => {
                debug!("Loaded {} {} option(s)", options.len(), ticket.tier);
                slot.options = options;
            }
            Err(e) => {
                warn!("Failed to load {} options: {}", ticket.tier, e);
                slot.options.clear();
            }
        }

        if let ResolverPhase::Restoring(progress) = &self.phase {
            if progress.awaiting == ticket.tier {
                return self.resume_restore();
            }
        }

        // A refreshed list may no longer contain the current choice
        if let Some(current) = self.selection.get(ticket.tier).cloned() {
            if !self.slot(ticket.tier).contains(&current) {
                debug!("{} {:?} no longer offered, clearing", ticket.tier, current.name);
                self.selection.set(ticket.tier, None);
                self.invalidate_below(ticket.tier);

                // The ticket the restore was waiting on is gone with it
                if self.is_restoring() {
                    debug!("Restore stopped: {} list reloaded without {:?}", ticket.tier, current.name);
                    return self.finish_restore();
                }
            }
        }

        Step::default()
    }

    fn begin_user_change(&mut self, tier: Tier, region: &Region) -> LocationResult<()> {
        if self.is_restoring() {
            return Err(LocationError::RestoreInProgress);
        }
        if let Some(parent) = tier.parent() {
            if self.selection.get(parent).is_none() {
                return Err(LocationError::NotSelectable(format!(
                    "choose a {} before a {}",
                    parent, tier
                )));
            }
        }
        if !self.slot(tier).contains(region) {
            return Err(LocationError::NotSelectable(format!(
                "{} {:?} is not in the current list",
                tier, region.name
            )));
        }
        self.phase = ResolverPhase::Interactive;
        Ok(())
    }

    /// Pick a province or district and refresh the tier below it
    fn select_parent(&mut self, tier: Tier, region: Region) -> LocationResult<Step> {
        self.begin_user_change(tier, &region)?;

        let changed = self
            .selection
            .get(tier)
            .map_or(true, |current| current.code != region.code);
        let code = region.code.clone();
        if changed {
            debug!("Selected {} {:?}", tier, region.name);
            self.selection.set(tier, Some(region));
            self.invalidate_below(tier);
        }

        let child = match tier.child() {
            Some(child) => child,
            None => return Ok(Step::default()),
        };
        Ok(Step::fetching(self.issue(child, Some(code))))
    }

    pub fn select_province(&mut self, region: Region) -> LocationResult<Step> {
        self.select_parent(Tier::Province, region)
    }

    pub fn select_district(&mut self, region: Region) -> LocationResult<Step> {
        self.select_parent(Tier::District, region)
    }

    /// Pick a ward; publishes once all three tiers are set
    pub fn select_ward(&mut self, region: Region) -> LocationResult<Step> {
        self.begin_user_change(Tier::Ward, &region)?;
        debug!("Selected ward {:?}", region.name);
        self.selection.set(Tier::Ward, Some(region));
        Ok(Step {
            fetch: None,
            publish: self.selection.location_value(),
        })
    }

    pub fn select(&mut self, tier: Tier, region: Region) -> LocationResult<Step> {
        match tier {
            Tier::Province => self.select_province(region),
            Tier::District => self.select_district(region),
            Tier::Ward => self.select_ward(region),
        }
    }

    /// Run a step's lookup chain inline until nothing is left to fetch.
    /// Returns the last value published along the way.
    pub async fn settle<L>(&mut self, lookup: &L, step: Step) -> Option<LocationValue>
    where
        L: LocationLookup + ?Sized,
    {
        let mut published = step.publish;
        let mut next = step.fetch;

        while let Some(ticket) = next {
            let result = fetch(lookup, &ticket).await;
            let step = self.apply(&ticket, result);
            if step.publish.is_some() {
                published = step.publish;
            }
            next = step.fetch;
        }

        published
    }
}

/// Run the lookup a ticket asks for
pub async fn fetch<L>(lookup: &L, ticket: &FetchTicket) -> LocationResult<Vec<Region>>
where
    L: LocationLookup + ?Sized,
{
    match (ticket.tier, ticket.parent.as_deref()) {
        (Tier::Province, _) => lookup.list_provinces().await,
        (Tier::District, Some(code)) => lookup.list_districts(code).await,
        (Tier::Ward, Some(code)) => lookup.list_wards(code).await,
        (tier, None) => Err(LocationError::NotSelectable(format!(
            "{} lookup needs a parent code",
            tier
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::offline::tests::sample;

    async fn loaded() -> LocationResolver {
        let mut resolver = LocationResolver::new();
        let lookup = sample();
        let step = Step::fetching(resolver.load_provinces());
        resolver.settle(&lookup, step).await;
        resolver
    }

    fn find(resolver: &LocationResolver, tier: Tier, name: &str) -> Region {
        resolver
            .options(tier)
            .iter()
            .find(|r| r.name == name)
            .cloned()
            .unwrap()
    }

    #[tokio::test]
    async fn test_full_selection_publishes_once_complete() {
        let lookup = sample();
        let mut resolver = loaded().await;
        assert!(resolver.is_enabled(Tier::Province));
        assert!(!resolver.is_enabled(Tier::District));

        let step = resolver.select_province(find(&resolver, Tier::Province, "Hà Nội")).unwrap();
        assert!(step.publish.is_none());
        assert_eq!(resolver.settle(&lookup, step).await, None);
        assert!(resolver.is_enabled(Tier::District));
        assert!(!resolver.is_enabled(Tier::Ward));

        let step = resolver.select_district(find(&resolver, Tier::District, "Ba Đình")).unwrap();
        assert_eq!(resolver.settle(&lookup, step).await, None);
        assert!(!resolver.is_complete());

        let step = resolver.select_ward(find(&resolver, Tier::Ward, "Trúc Bạch")).unwrap();
        let value = step.publish.expect("complete selection publishes");
        assert_eq!(value.value, "Hà Nội_Ba Đình_Trúc Bạch");
        assert_eq!(value.label, "Trúc Bạch, Ba Đình, Hà Nội");
        assert!(resolver.is_complete());
    }

    #[tokio::test]
    async fn test_changing_province_clears_district_and_ward() {
        let lookup = sample();
        let mut resolver = loaded().await;

        let step = resolver.select_province(find(&resolver, Tier::Province, "Hà Nội")).unwrap();
        resolver.settle(&lookup, step).await;
        let step = resolver.select_district(find(&resolver, Tier::District, "Ba Đình")).unwrap();
        resolver.settle(&lookup, step).await;
        assert_eq!(resolver.selection().district().unwrap().name, "Ba Đình");

        let step = resolver
            .select_province(find(&resolver, Tier::Province, "Hồ Chí Minh"))
            .unwrap();
        resolver.settle(&lookup, step).await;

        assert!(resolver.selection().district().is_none());
        assert!(resolver.selection().ward().is_none());
        assert!(resolver.options(Tier::Ward).is_empty());
        let names: Vec<_> = resolver.options(Tier::District).iter().map(|d| d.name.clone()).collect();
        assert_eq!(names, vec!["Quận 1"]);
    }

    #[tokio::test]
    async fn test_refresh_drops_district_missing_from_new_list() {
        let mut resolver = loaded().await;
        let hanoi = find(&resolver, Tier::Province, "Hà Nội");

        let step = resolver.select_province(hanoi.clone()).unwrap();
        let ticket = step.fetch.unwrap();
        resolver.apply(&ticket, Ok(vec![Region::new("1", "Ba Đình"), Region::new("2", "Hoàn Kiếm")]));
        let step = resolver.select_district(Region::new("1", "Ba Đình")).unwrap();
        let ward_ticket = step.fetch.unwrap();
        resolver.apply(&ward_ticket, Ok(vec![Region::new("1", "Phúc Xá")]));
        resolver.select_ward(Region::new("1", "Phúc Xá")).unwrap();
        assert!(resolver.is_complete());

        // Re-selecting the same province keeps the district until the
        // refreshed list says otherwise
        let step = resolver.select_province(hanoi).unwrap();
        assert_eq!(resolver.selection().district().unwrap().name, "Ba Đình");
        resolver.apply(&step.fetch.unwrap(), Ok(vec![Region::new("3", "Tây Hồ")]));

        assert!(resolver.selection().district().is_none());
        assert!(resolver.selection().ward().is_none());
        assert!(!resolver.is_complete());
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let mut resolver = loaded().await;

        let first = resolver
            .select_province(find(&resolver, Tier::Province, "Hà Nội"))
            .unwrap()
            .fetch
            .unwrap();
        let second = resolver
            .select_province(find(&resolver, Tier::Province, "Hồ Chí Minh"))
            .unwrap()
            .fetch
            .unwrap();
        assert!(second.seq > first.seq);

        resolver.apply(&second, Ok(vec![Region::new("760", "Quận 1")]));
        // The Hà Nội response arrives late
        let step = resolver.apply(&first, Ok(vec![Region::new("1", "Ba Đình")]));
        assert!(step.is_idle());

        let names: Vec<_> = resolver.options(Tier::District).iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Quận 1"]);
        assert_eq!(resolver.selection().province().unwrap().name, "Hồ Chí Minh");
    }

    #[tokio::test]
    async fn test_ward_response_for_old_district_is_discarded() {
        let mut resolver = loaded().await;
        let step = resolver.select_province(find(&resolver, Tier::Province, "Hà Nội")).unwrap();
        resolver.apply(&step.fetch.unwrap(), Ok(vec![Region::new("1", "Ba Đình")]));
        let ward_ticket = resolver
            .select_district(Region::new("1", "Ba Đình"))
            .unwrap()
            .fetch
            .unwrap();

        // Province changes while the ward lookup is in flight
        resolver
            .select_province(find(&resolver, Tier::Province, "Hồ Chí Minh"))
            .unwrap();
        resolver.apply(&ward_ticket, Ok(vec![Region::new("1", "Phúc Xá")]));

        assert!(resolver.options(Tier::Ward).is_empty());
        assert!(!resolver.is_enabled(Tier::Ward));
    }

    #[tokio::test]
    async fn test_failed_lookup_disables_tier() {
        let mut resolver = loaded().await;
        let ticket = resolver
            .select_province(find(&resolver, Tier::Province, "Hà Nội"))
            .unwrap()
            .fetch
            .unwrap();
        resolver.apply(&ticket, Err(LocationError::Api("502 Bad Gateway".to_string())));

        assert!(!resolver.is_loading(Tier::District));
        assert!(resolver.options(Tier::District).is_empty());
        assert!(!resolver.is_enabled(Tier::District));
        assert!(matches!(
            resolver.select_district(Region::new("1", "Ba Đình")),
            Err(LocationError::NotSelectable(_))
        ));
    }

    #[tokio::test]
    async fn test_selection_requires_parent_and_listed_option() {
        let mut resolver = loaded().await;
        assert!(matches!(
            resolver.select_district(Region::new("1", "Ba Đình")),
            Err(LocationError::NotSelectable(_))
        ));
        assert!(matches!(
            resolver.select_province(Region::new("999", "Atlantis")),
            Err(LocationError::NotSelectable(_))
        ));
        assert_eq!(resolver.phase(), &ResolverPhase::Empty);
    }

    #[tokio::test]
    async fn test_restore_resolves_all_tiers() {
        let lookup = sample();
        let mut resolver = LocationResolver::new();

        let step = resolver.restore("Hà Nội_Ba Đình_Phúc Xá");
        assert!(resolver.is_restoring());
        let published = resolver.settle(&lookup, step).await;

        let value = published.expect("restored selection publishes");
        assert_eq!(value.value, "Hà Nội_Ba Đình_Phúc Xá");
        assert_eq!(resolver.phase(), &ResolverPhase::Interactive);
        assert_eq!(resolver.selection().ward().unwrap().code, "1");
        assert_eq!(resolver.options(Tier::Ward).len(), 2);
    }

    #[tokio::test]
    async fn test_restore_waits_for_in_flight_provinces() {
        let lookup = sample();
        let mut resolver = LocationResolver::new();
        let provinces = resolver.load_provinces();

        let step = resolver.restore("Hồ Chí Minh_Quận 1_Tân Định");
        assert!(step.is_idle());

        let result = fetch(&lookup, &provinces).await;
        let step = resolver.apply(&provinces, result);
        let published = resolver.settle(&lookup, step).await;
        assert_eq!(published.unwrap().label, "Tân Định, Quận 1, Hồ Chí Minh");
    }

    #[tokio::test]
    async fn test_restore_stops_at_unknown_name() {
        let lookup = sample();
        let mut resolver = loaded().await;

        let step = resolver.restore("Hà Nội_Quận Không Tồn Tại_Phúc Xá");
        let published = resolver.settle(&lookup, step).await;

        assert!(published.is_none());
        assert_eq!(resolver.phase(), &ResolverPhase::Interactive);
        assert_eq!(resolver.selection().province().unwrap().name, "Hà Nội");
        assert!(resolver.selection().district().is_none());
        assert!(resolver.selection().ward().is_none());
        // The district list is still there for the user to continue
        assert!(resolver.is_enabled(Tier::District));
    }

    #[tokio::test]
    async fn test_restore_runs_once() {
        let lookup = sample();
        let mut resolver = loaded().await;

        let step = resolver.restore("Hà Nội_Ba Đình_Phúc Xá");
        resolver.settle(&lookup, step).await;
        let after_first = resolver.selection().clone();

        let step = resolver.restore("Hà Nội_Ba Đình_Phúc Xá");
        assert!(step.is_idle());

        // Reloading the provinces does not trigger a second restore
        let step = Step::fetching(resolver.load_provinces());
        resolver.settle(&lookup, step).await;
        let step = resolver.restore("Hồ Chí Minh_Quận 1_Tân Định");
        assert!(step.is_idle());

        assert_eq!(resolver.selection(), &after_first);
    }

    #[tokio::test]
    async fn test_user_selection_rejected_while_restoring() {
        let mut resolver = loaded().await;
        let step = resolver.restore("Hà Nội_Ba Đình_Phúc Xá");
        assert!(step.fetch.is_some());

        let result = resolver.select_province(find(&resolver, Tier::Province, "Hồ Chí Minh"));
        assert!(matches!(result, Err(LocationError::RestoreInProgress)));
    }

    #[tokio::test]
    async fn test_failed_province_reload_ends_restore() {
        let lookup = sample();
        let mut resolver = loaded().await;
        let districts = resolver.restore("Hà Nội_Ba Đình_Phúc Xá").fetch.unwrap();

        let reload = resolver.load_provinces();
        let step = resolver.apply(&reload, Err(LocationError::Api("502 Bad Gateway".to_string())));
        assert!(step.is_idle());
        assert_eq!(resolver.phase(), &ResolverPhase::Interactive);
        assert!(resolver.selection().is_empty());

        // The district response for the dropped province is stale
        let step = resolver.apply(&districts, Ok(vec![Region::new("1", "Ba Đình")]));
        assert!(step.is_idle());
        assert!(resolver.options(Tier::District).is_empty());

        // The user can carry on once provinces load again
        let step = Step::fetching(resolver.load_provinces());
        resolver.settle(&lookup, step).await;
        let step = resolver.select_province(find(&resolver, Tier::Province, "Hồ Chí Minh"));
        assert!(step.is_ok());
    }

    #[tokio::test]
    async fn test_province_reload_without_restored_entry_ends_restore() {
        let mut resolver = loaded().await;
        resolver.restore("Hà Nội_Ba Đình_Phúc Xá");

        let reload = resolver.load_provinces();
        let step = resolver.apply(&reload, Ok(vec![Region::new("79", "Hồ Chí Minh")]));
        assert!(step.publish.is_none());
        assert!(!resolver.is_restoring());
        assert!(!resolver.is_loading(Tier::District));

        let step = resolver.select_province(Region::new("79", "Hồ Chí Minh")).unwrap();
        assert!(step.fetch.is_some());
    }

    #[tokio::test]
    async fn test_restore_survives_reload_that_keeps_entry() {
        let lookup = sample();
        let mut resolver = loaded().await;
        let step = resolver.restore("Hà Nội_Ba Đình_Phúc Xá");

        let reload = resolver.load_provinces();
        let result = fetch(&lookup, &reload).await;
        assert!(resolver.apply(&reload, result).is_idle());
        assert!(resolver.is_restoring());

        let published = resolver.settle(&lookup, step).await;
        assert_eq!(published.unwrap().value, "Hà Nội_Ba Đình_Phúc Xá");
    }

    #[tokio::test]
    async fn test_restore_without_ward_still_loads_wards() {
        let lookup = sample();
        let mut resolver = loaded().await;
        let step = resolver.restore("Hà Nội_Hoàn Kiếm");
        let published = resolver.settle(&lookup, step).await;

        assert!(published.is_none());
        assert_eq!(resolver.selection().district().unwrap().name, "Hoàn Kiếm");
        assert_eq!(resolver.options(Tier::Ward), &[Region::new("37", "Phúc Tân")]);
    }

    #[tokio::test]
    async fn test_fetch_without_parent_fails() {
        let lookup = sample();
        let ticket = FetchTicket {
            tier: Tier::Ward,
            parent: None,
            seq: 1,
        };
        assert!(fetch(&lookup, &ticket).await.is_err());
    }
}
