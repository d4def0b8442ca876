//! The assembled problem definition.

use rand::Rng;

use super::{Item, ItemId, Resource, ResourceId, Time, Timeslot};

/// Upper bound (inclusive) for request durations in generated topologies.
pub const MAX_GENERATED_DURATION: Time = 20;

/// Items, resources, and each resource's request plan.
///
/// Work slots in the plans refer to items by [`ItemId`]; every id is a valid
/// index into [`items`](Self::items) when the topology was assembled through
/// [`TopologyBuilder`], [`Topology::random`] or flat records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Topology {
    items: Vec<Item>,
    resources: Vec<Resource>,
}

impl Topology {
    /// Starts an empty builder.
    pub fn builder() -> TopologyBuilder {
        TopologyBuilder::default()
    }

    /// Generates a random problem.
    ///
    /// Items are named `I1..In` and resources `R1..Rm`. Each resource
    /// requests between 1 and `item_count` slots; each slot names a uniformly
    /// chosen item (repeats allowed) with a duration in
    /// `1..=MAX_GENERATED_DURATION`. With no items every plan is empty.
    pub fn random<R: Rng>(item_count: usize, resource_count: usize, rng: &mut R) -> Self {
        let mut builder = Self::builder();
        let items: Vec<ItemId> = (1..=item_count)
            .map(|i| builder.item(format!("I{i}")))
            .collect();
        let resources: Vec<ResourceId> = (1..=resource_count)
            .map(|r| builder.resource(format!("R{r}")))
            .collect();

        if items.is_empty() {
            return builder.build();
        }

        for resource in resources {
            let requests = rng.random_range(1..=items.len());
            for _ in 0..requests {
                let item = items[rng.random_range(0..items.len())];
                let duration = rng.random_range(1..=MAX_GENERATED_DURATION);
                builder.request(resource, item, duration);
            }
        }
        builder.build()
    }

    /// All items.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// All resources.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Item by id.
    ///
    /// # Panics
    /// Panics if the id does not belong to this topology.
    pub fn item(&self, id: ItemId) -> &Item {
        &self.items[id.index()]
    }

    /// Resource by id.
    ///
    /// # Panics
    /// Panics if the id does not belong to this topology.
    pub fn resource(&self, id: ResourceId) -> &Resource {
        &self.resources[id.index()]
    }

    /// Display label of a slot: the item name, or `Delay`.
    pub fn slot_label(&self, slot: &Timeslot) -> &str {
        match slot.item() {
            Some(id) => self.item(id).name(),
            None => Timeslot::DELAY_LABEL,
        }
    }

    /// Number of items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Number of resources.
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Total number of requested slots across all plans.
    pub fn total_slots(&self) -> usize {
        self.resources.iter().map(|r| r.plan().len()).sum()
    }

    /// Sum of every requested duration, or `None` if it overflows [`Time`].
    ///
    /// No resolved schedule ends later than this.
    pub fn total_duration(&self) -> Option<Time> {
        self.resources
            .iter()
            .flat_map(Resource::plan)
            .try_fold(0, |acc: Time, slot| acc.checked_add(slot.duration()))
    }

    /// Largest single-resource plan time, a lower bound on any makespan.
    pub fn plan_time_lower_bound(&self) -> Time {
        self.resources
            .iter()
            .map(Resource::plan_time)
            .max()
            .unwrap_or(0)
    }
}

/// Incremental construction of a [`Topology`].
///
/// ```
/// use u_deadlock::model::Topology;
///
/// let mut b = Topology::builder();
/// let i1 = b.item("I1");
/// let r1 = b.resource("R1");
/// b.request(r1, i1, 5);
/// let topology = b.build();
/// assert_eq!(topology.total_slots(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TopologyBuilder {
    items: Vec<Item>,
    resources: Vec<Resource>,
}

impl TopologyBuilder {
    /// Adds an item and returns its id.
    pub fn item(&mut self, name: impl Into<String>) -> ItemId {
        self.items.push(Item::new(name));
        ItemId::new(self.items.len() - 1)
    }

    /// Adds a resource with an empty plan and returns its id.
    pub fn resource(&mut self, name: impl Into<String>) -> ResourceId {
        self.resources.push(Resource::new(name));
        ResourceId::new(self.resources.len() - 1)
    }

    /// Looks up an item by name.
    pub fn find_item(&self, name: &str) -> Option<ItemId> {
        self.items
            .iter()
            .position(|i| i.name() == name)
            .map(ItemId::new)
    }

    /// Looks up a resource by name.
    pub fn find_resource(&self, name: &str) -> Option<ResourceId> {
        self.resources
            .iter()
            .position(|r| r.name() == name)
            .map(ResourceId::new)
    }

    /// Appends a work request to a resource's plan.
    ///
    /// # Panics
    /// Panics if either id was not issued by this builder.
    pub fn request(&mut self, resource: ResourceId, item: ItemId, duration: Time) -> &mut Self {
        assert!(item.index() < self.items.len(), "unknown item {item:?}");
        self.resources[resource.index()].add_to_plan(Timeslot::work(item, duration));
        self
    }

    /// Finishes the topology.
    pub fn build(self) -> Topology {
        Topology {
            items: self.items,
            resources: self.resources,
        }
    }
}
