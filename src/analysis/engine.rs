//! Relationship queries over a completed dataset
//!
//! The engine is pure and stateless: it borrows an immutable [`Dataset`] and
//! holds nothing else, so one dataset can back any number of engines across
//! threads once the linking pass has finished. Every query is a total
//! function over a well-formed dataset: an unresolved reference anywhere
//! simply terminates that traversal branch and contributes nothing.

use std::collections::BTreeMap;

use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::models::{Dataset, Person};

/// Highest cousin degree the engine classifies
pub const MAX_COUSIN_DEGREE: usize = 6;

/// Relationship edge followed by a traversal
#[derive(Debug, Clone, Copy)]
enum Edge {
    Parents,
    Children,
}

/// Read-only relationship query engine over a completed [`Dataset`]
#[derive(Debug, Clone, Copy)]
pub struct RelationshipEngine<'a> {
    data: &'a Dataset,
}

impl<'a> RelationshipEngine<'a> {
    /// Create an engine borrowing the given dataset
    #[must_use]
    pub fn new(data: &'a Dataset) -> Self {
        Self { data }
    }

    /// Get all ancestors of a person (parents, grandparents, ...), the
    /// person themselves excluded
    #[must_use]
    pub fn ancestors(&self, person: &Person) -> Vec<&'a Person> {
        self.closure(person, Edge::Parents, None)
    }

    /// Get ancestors up to `max_generations` parent-steps away
    #[must_use]
    pub fn ancestors_within(&self, person: &Person, max_generations: usize) -> Vec<&'a Person> {
        self.closure(person, Edge::Parents, Some(max_generations))
    }

    /// Get all descendants of a person (children, grandchildren, ...), the
    /// person themselves excluded
    #[must_use]
    pub fn descendants(&self, person: &Person) -> Vec<&'a Person> {
        self.closure(person, Edge::Children, None)
    }

    /// Get descendants up to `max_generations` child-steps away
    #[must_use]
    pub fn descendants_within(&self, person: &Person, max_generations: usize) -> Vec<&'a Person> {
        self.closure(person, Edge::Children, Some(max_generations))
    }

    /// Get the siblings of a person, resolved from the precomputed list in
    /// its first-encountered order
    #[must_use]
    pub fn siblings(&self, person: &Person) -> Vec<&'a Person> {
        let Some(start) = self.data.person(&person.id) else {
            return Vec::new();
        };
        start
            .siblings
            .iter()
            .filter_map(|id| self.data.person(id))
            .collect()
    }

    /// Get the cousins of a person at exactly the given degree (1 = first
    /// cousins).
    ///
    /// Degrees are exclusive: the result contains no one who is the person
    /// themselves, a sibling, or a cousin of a lower degree (the closest
    /// relationship wins). Degrees outside `1..=MAX_COUSIN_DEGREE` yield an
    /// empty result.
    #[must_use]
    pub fn cousins(&self, person: &Person, degree: usize) -> Vec<&'a Person> {
        if degree == 0 || degree > MAX_COUSIN_DEGREE {
            return Vec::new();
        }
        let Some(start) = self.data.person(&person.id) else {
            return Vec::new();
        };
        let mut sets = self.cousin_sets_up_to(start, degree);
        self.resolve_set(sets.pop().unwrap_or_default())
    }

    /// Get the union of all cousins of degree 1 through `max_degree`
    #[must_use]
    pub fn all_cousins(&self, person: &Person, max_degree: usize) -> Vec<&'a Person> {
        let Some(start) = self.data.person(&person.id) else {
            return Vec::new();
        };
        let sets = self.cousin_sets_up_to(start, max_degree.min(MAX_COUSIN_DEGREE));
        let mut union: FxHashSet<&'a str> = FxHashSet::default();
        for set in sets {
            union.extend(set);
        }
        self.resolve_set(union)
    }

    /// Get cousins of the given degree grouped by the families in which they
    /// are recorded as a child.
    ///
    /// A cousin recorded as a child in two families appears under both ids;
    /// the degree-exclusion filter of [`Self::cousins`] applies throughout,
    /// and buckets left empty are dropped from the result.
    #[must_use]
    pub fn cousins_by_family(
        &self,
        person: &Person,
        degree: usize,
    ) -> FxHashMap<String, Vec<&'a Person>> {
        let mut grouped: FxHashMap<String, Vec<&'a Person>> = FxHashMap::default();
        for cousin in self.cousins(person, degree) {
            for family_id in &cousin.child_family_ids {
                grouped.entry(family_id.clone()).or_default().push(cousin);
            }
        }
        grouped
    }

    /// Classify the relationship between two people.
    ///
    /// Fixed check order, first match wins: `0` for the same person, `1` for
    /// siblings, `d + 1` for degree-`d` cousins, `-2` when one is an
    /// ancestor of the other (any number of generations, checked only after
    /// the sibling and cousin checks fail) and `-1` when no relationship is
    /// found. A classification lookup, not a shortest-path distance.
    #[must_use]
    pub fn relationship_degree(&self, a: &Person, b: &Person) -> i32 {
        if a.id == b.id {
            return 0;
        }
        let (Some(first), Some(second)) = (self.data.person(&a.id), self.data.person(&b.id))
        else {
            return -1;
        };

        if first.siblings.iter().any(|id| *id == second.id) {
            return 1;
        }

        let cousin_sets = self.cousin_sets_up_to(first, MAX_COUSIN_DEGREE);
        for (index, set) in cousin_sets.iter().enumerate() {
            if set.contains(second.id.as_str()) {
                return index as i32 + 2;
            }
        }

        if self.closure_ids(first, Edge::Parents, None).contains(second.id.as_str())
            || self.closure_ids(second, Edge::Parents, None).contains(first.id.as_str())
        {
            return -2;
        }

        -1
    }

    /// Get ancestors grouped by generation (1 = parents, 2 = grandparents).
    ///
    /// Breadth-first with one global visited set: an ancestor reachable via
    /// two lineage paths of different lengths is recorded only under the
    /// generation at which the traversal first visits them.
    #[must_use]
    pub fn ancestors_by_generation(&self, person: &Person) -> BTreeMap<usize, Vec<&'a Person>> {
        self.by_generation(person, Edge::Parents)
    }

    /// Get descendants grouped by generation (1 = children,
    /// 2 = grandchildren); first-visited generation wins, as for
    /// [`Self::ancestors_by_generation`]
    #[must_use]
    pub fn descendants_by_generation(&self, person: &Person) -> BTreeMap<usize, Vec<&'a Person>> {
        self.by_generation(person, Edge::Children)
    }

    fn edges(person: &'a Person, edge: Edge) -> &'a [String] {
        match edge {
            Edge::Parents => &person.parents,
            Edge::Children => &person.children,
        }
    }

    /// Transitive closure over one edge kind, optionally depth-bounded; the
    /// start person is excluded from the result
    fn closure_ids(
        &self,
        start: &'a Person,
        edge: Edge,
        max_generations: Option<usize>,
    ) -> FxHashSet<&'a str> {
        let mut visited: FxHashSet<&'a str> = FxHashSet::default();
        visited.insert(start.id.as_str());

        let mut frontier: Vec<&'a Person> = vec![start];
        let mut generation = 0;
        while !frontier.is_empty() {
            if max_generations.is_some_and(|max| generation >= max) {
                break;
            }
            let mut next: Vec<&'a Person> = Vec::new();
            for &person in &frontier {
                for id in Self::edges(person, edge) {
                    if visited.insert(id.as_str()) {
                        if let Some(relative) = self.data.person(id) {
                            next.push(relative);
                        }
                    }
                }
            }
            frontier = next;
            generation += 1;
        }

        visited.remove(start.id.as_str());
        visited
    }

    fn closure(
        &self,
        person: &Person,
        edge: Edge,
        max_generations: Option<usize>,
    ) -> Vec<&'a Person> {
        let Some(start) = self.data.person(&person.id) else {
            return Vec::new();
        };
        self.resolve_set(self.closure_ids(start, edge, max_generations))
    }

    fn by_generation(&self, person: &Person, edge: Edge) -> BTreeMap<usize, Vec<&'a Person>> {
        let mut result = BTreeMap::new();
        let Some(start) = self.data.person(&person.id) else {
            return result;
        };

        let mut visited: FxHashSet<&'a str> = FxHashSet::default();
        visited.insert(start.id.as_str());

        let mut frontier: Vec<&'a Person> = vec![start];
        let mut generation = 1;
        loop {
            let mut next: Vec<&'a Person> = Vec::new();
            for &person in &frontier {
                for id in Self::edges(person, edge) {
                    if visited.insert(id.as_str()) {
                        if let Some(relative) = self.data.person(id) {
                            next.push(relative);
                        }
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            result.insert(generation, next.clone());
            frontier = next;
            generation += 1;
        }

        result
    }

    /// Walk up exactly `generations` parent-steps along every available path
    fn ancestor_ids_at(&self, start: &'a Person, generations: usize) -> FxHashSet<&'a str> {
        let mut level: FxHashSet<&'a str> = FxHashSet::default();
        level.insert(start.id.as_str());
        for _ in 0..generations {
            level = level
                .iter()
                .filter_map(|id| self.data.person(id))
                .flat_map(|person| person.parents.iter().map(String::as_str))
                .collect();
        }
        level
    }

    /// Walk down exactly `generations` child-steps from every given person
    fn descendant_ids_at(
        &self,
        from: FxHashSet<&'a str>,
        generations: usize,
    ) -> FxHashSet<&'a str> {
        let mut level = from;
        for _ in 0..generations {
            level = level
                .iter()
                .filter_map(|id| self.data.person(id))
                .flat_map(|person| person.children.iter().map(String::as_str))
                .collect();
        }
        level
    }

    /// Everyone reachable by walking up `degree` generations, over to a
    /// sibling of the ancestor reached, and back down `degree` generations.
    /// A missing ancestor anywhere along a path contributes nothing from
    /// that path.
    fn cousin_candidates(&self, start: &'a Person, degree: usize) -> FxHashSet<&'a str> {
        let branch_heads: FxHashSet<&'a str> = self
            .ancestor_ids_at(start, degree)
            .iter()
            .filter_map(|id| self.data.person(id))
            .flat_map(|ancestor| ancestor.siblings.iter().map(String::as_str))
            .collect();
        self.descendant_ids_at(branch_heads, degree)
    }

    /// Exclusive per-degree cousin id sets for degrees 1 through `degree`,
    /// in order; each set excludes the start person, their siblings and
    /// every lower-degree set
    fn cousin_sets_up_to(&self, start: &'a Person, degree: usize) -> Vec<FxHashSet<&'a str>> {
        let mut excluded: FxHashSet<&'a str> = FxHashSet::default();
        excluded.insert(start.id.as_str());
        excluded.extend(start.siblings.iter().map(String::as_str));

        let mut sets = Vec::with_capacity(degree);
        for d in 1..=degree {
            let mut candidates = self.cousin_candidates(start, d);
            candidates.retain(|id| !excluded.contains(id));
            excluded.extend(candidates.iter().copied());
            sets.push(candidates);
        }
        sets
    }

    /// Resolve an id set into person references, ordered by id so results
    /// are reproducible
    fn resolve_set(&self, ids: FxHashSet<&'a str>) -> Vec<&'a Person> {
        ids.into_iter()
            .sorted_unstable()
            .filter_map(|id| self.data.person(id))
            .collect()
    }
}
