//! Connection Manager
//!
//! Directed graph of pairwise connection records plus per-pair interaction
//! history. Recording an interaction always logs it; if the pair has a
//! connection, every matching impact rule is applied in list order.

use std::collections::HashMap;

use psyche_events::{pair_key, Interaction, StateChange, Tick, Topic};

use crate::components::{Connection, ConnectionPatch};
use crate::observe::{ObserverId, Observers};

/// Default number of interactions retained per ordered pair
pub const INTERACTION_HISTORY_CAP: usize = 100;

type Predicate = Box<dyn Fn(&Interaction) -> bool>;
type Impact = Box<dyn Fn(&Interaction, &Connection) -> ConnectionPatch>;

/// One entry in the ordered impact rule list
///
/// The impact function is pure: it reads the interaction and the current
/// connection and returns a partial record with the fields it wants
/// changed. Rules never see or hold mutable state, so each one can be
/// tested on its own.
pub struct ImpactRule {
    name: &'static str,
    predicate: Predicate,
    impact: Impact,
}

impl ImpactRule {
    pub fn new(
        name: &'static str,
        predicate: impl Fn(&Interaction) -> bool + 'static,
        impact: impl Fn(&Interaction, &Connection) -> ConnectionPatch + 'static,
    ) -> Self {
        Self {
            name,
            predicate: Box::new(predicate),
            impact: Box::new(impact),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn matches(&self, interaction: &Interaction) -> bool {
        (self.predicate)(interaction)
    }

    pub fn apply(&self, interaction: &Interaction, connection: &Connection) -> ConnectionPatch {
        (self.impact)(interaction, connection)
    }
}

/// Positive interactions raise trust, familiarity, and value, each capped
/// at 1.
pub fn positive_impact_rule() -> ImpactRule {
    ImpactRule::new(
        "positive_impact",
        |interaction| interaction.impact.connection_strength > 0.0,
        |interaction, connection| {
            ConnectionPatch::new()
                .with_trust((connection.trust + interaction.impact.trust).min(1.0))
                .with_familiarity(
                    (connection.familiarity + interaction.impact.familiarity).min(1.0),
                )
                .with_value((connection.value + interaction.impact.connection_strength).min(1.0))
        },
    )
}

/// Negative interactions lower trust (floor 0) and value (floor -1);
/// familiarity is left untouched.
pub fn negative_impact_rule() -> ImpactRule {
    ImpactRule::new(
        "negative_impact",
        |interaction| interaction.impact.connection_strength < 0.0,
        |interaction, connection| {
            ConnectionPatch::new()
                .with_trust((connection.trust + interaction.impact.trust).max(0.0))
                .with_value((connection.value + interaction.impact.connection_strength).max(-1.0))
        },
    )
}

pub struct ConnectionManager {
    connections: HashMap<String, HashMap<String, Connection>>,
    history: HashMap<String, Vec<Interaction>>,
    rules: Vec<ImpactRule>,
    history_cap: usize,
    observers: Observers,
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self::with_observers(Observers::new())
    }

    /// Build a manager that notifies through a shared hub, seeded with the
    /// two default impact rules.
    pub fn with_observers(observers: Observers) -> Self {
        Self {
            connections: HashMap::new(),
            history: HashMap::new(),
            rules: vec![positive_impact_rule(), negative_impact_rule()],
            history_cap: INTERACTION_HISTORY_CAP,
            observers,
        }
    }

    pub fn with_history_cap(mut self, cap: usize) -> Self {
        self.history_cap = cap;
        self
    }

    /// Append a rule to the list. Every matching rule applies cumulatively
    /// in list order, so later rules see the effects of earlier ones.
    pub fn add_rule(&mut self, rule: ImpactRule) {
        self.rules.push(rule);
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Create (or overwrite) the directed record for a pair with default
    /// values, timestamped now.
    pub fn connect(
        &mut self,
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        now: Tick,
    ) -> &Connection {
        self.connect_with(source_id, target_id, ConnectionPatch::new(), now)
    }

    /// Like `connect`, with initial values overriding the defaults.
    pub fn connect_with(
        &mut self,
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        initial: ConnectionPatch,
        now: Tick,
    ) -> &Connection {
        let source_id = source_id.into();
        let target_id = target_id.into();

        let mut connection = Connection::new(now);
        connection.patch(&initial);

        let change = StateChange::Connected {
            source_id: source_id.clone(),
            target_id: target_id.clone(),
        };
        let slot = self
            .connections
            .entry(source_id)
            .or_default()
            .entry(target_id)
            .or_insert(connection);
        *slot = connection;

        self.observers.emit(&change);
        slot
    }

    /// Remove the directed record if present; no-op otherwise.
    pub fn disconnect(&mut self, source_id: &str, target_id: &str) -> bool {
        let removed = match self.connections.get_mut(source_id) {
            Some(targets) => targets.remove(target_id).is_some(),
            None => false,
        };
        if removed {
            if self
                .connections
                .get(source_id)
                .map_or(false, |targets| targets.is_empty())
            {
                self.connections.remove(source_id);
            }
            self.observers.emit(&StateChange::Disconnected {
                source_id: source_id.to_string(),
                target_id: target_id.to_string(),
            });
        }
        removed
    }

    pub fn get_connection(&self, source_id: &str, target_id: &str) -> Option<&Connection> {
        self.connections
            .get(source_id)
            .and_then(|targets| targets.get(target_id))
    }

    /// Outgoing connections for one agent, sorted by target id.
    pub fn connections_from(&self, source_id: &str) -> Vec<(String, Connection)> {
        let mut out: Vec<(String, Connection)> = self
            .connections
            .get(source_id)
            .map(|targets| {
                targets
                    .iter()
                    .map(|(target, connection)| (target.clone(), *connection))
                    .collect()
            })
            .unwrap_or_default();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    /// Every connection as (source, target, record), sorted by ids.
    pub fn all_connections(&self) -> Vec<(String, String, Connection)> {
        let mut all: Vec<(String, String, Connection)> = self
            .connections
            .iter()
            .flat_map(|(source, targets)| {
                targets
                    .iter()
                    .map(move |(target, connection)| (source.clone(), target.clone(), *connection))
            })
            .collect();
        all.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));
        all
    }

    pub fn connection_count(&self) -> usize {
        self.connections.values().map(HashMap::len).sum()
    }

    /// Log an interaction and, if the pair is connected, run the rules.
    ///
    /// The history entry is always appended. When no connection exists the
    /// state change is silently skipped; the pair has to be connected
    /// explicitly first. On an existing connection every matching rule is
    /// applied in order, `last_interaction` is refreshed, and a
    /// `connection_updated` notification goes out.
    pub fn record_interaction(&mut self, interaction: &Interaction) {
        let log = self.history.entry(interaction.pair_key()).or_default();
        log.push(interaction.clone());
        if log.len() > self.history_cap {
            let excess = log.len() - self.history_cap;
            log.drain(..excess);
        }

        let connection = match self
            .connections
            .get_mut(&interaction.source_id)
            .and_then(|targets| targets.get_mut(&interaction.target_id))
        {
            Some(c) => c,
            None => return,
        };

        let mut updated = *connection;
        let mut applied = 0;
        for rule in &self.rules {
            if rule.matches(interaction) {
                let patch = rule.apply(interaction, &updated);
                updated.patch(&patch);
                applied += 1;
            }
        }
        updated.last_interaction = interaction.timestamp;
        *connection = updated;

        tracing::debug!(
            source = %interaction.source_id,
            target = %interaction.target_id,
            rules = applied,
            "applied interaction impact"
        );

        self.observers.emit(&StateChange::ConnectionUpdated {
            source_id: interaction.source_id.clone(),
            target_id: interaction.target_id.clone(),
            value: updated.value,
            trust: updated.trust,
            familiarity: updated.familiarity,
        });
    }

    /// Interaction history for the ordered pair, oldest first.
    pub fn history(&self, source_id: &str, target_id: &str) -> &[Interaction] {
        self.history
            .get(&pair_key(source_id, target_id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Drop every connection into or out of an agent. History is kept;
    /// past interactions happened regardless of who is still around.
    pub fn remove_agent(&mut self, agent_id: &str) {
        let mut removed: Vec<(String, String)> = Vec::new();

        if let Some(targets) = self.connections.remove(agent_id) {
            for target in targets.keys() {
                removed.push((agent_id.to_string(), target.clone()));
            }
        }
        self.connections.retain(|source, targets| {
            if targets.remove(agent_id).is_some() {
                removed.push((source.clone(), agent_id.to_string()));
            }
            !targets.is_empty()
        });

        removed.sort();
        for (source_id, target_id) in removed {
            self.observers.emit(&StateChange::Disconnected {
                source_id,
                target_id,
            });
        }
    }

    /// Handle to the shared notification hub.
    pub fn observers(&self) -> Observers {
        self.observers.clone()
    }

    /// Register an observer for one topic.
    pub fn observe(&self, topic: Topic, callback: impl Fn(&StateChange) + 'static) -> ObserverId {
        self.observers.observe(topic, callback)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::components::INITIAL_TRUST;
    use psyche_events::{InteractionImpact, InteractionKind};

    fn make_interaction(impact: InteractionImpact) -> Interaction {
        Interaction::new(
            InteractionKind::Conversation,
            "agent_a",
            "agent_b",
            Tick::new(10),
            impact,
        )
    }

    #[test]
    fn test_connect_creates_with_defaults() {
        let mut manager = ConnectionManager::new();
        manager.connect("agent_a", "agent_b", Tick::new(3));

        let conn = manager.get_connection("agent_a", "agent_b").unwrap();
        assert_eq!(conn.value, 0.0);
        assert_eq!(conn.trust, INITIAL_TRUST);
        assert_eq!(conn.familiarity, 0.0);
        assert_eq!(conn.last_interaction, Tick::new(3));

        assert!(manager.get_connection("agent_b", "agent_a").is_none());
    }

    #[test]
    fn test_connect_with_overrides() {
        let mut manager = ConnectionManager::new();
        manager.connect_with(
            "agent_a",
            "agent_b",
            ConnectionPatch::new().with_trust(0.6).with_value(0.4),
            Tick::ZERO,
        );

        let conn = manager.get_connection("agent_a", "agent_b").unwrap();
        assert_eq!(conn.trust, 0.6);
        assert_eq!(conn.value, 0.4);
        assert_eq!(conn.familiarity, 0.0);
    }

    #[test]
    fn test_connect_overwrites_existing() {
        let mut manager = ConnectionManager::new();
        manager.connect_with(
            "agent_a",
            "agent_b",
            ConnectionPatch::new().with_trust(0.9),
            Tick::ZERO,
        );
        manager.connect("agent_a", "agent_b", Tick::new(5));

        let conn = manager.get_connection("agent_a", "agent_b").unwrap();
        assert_eq!(conn.trust, INITIAL_TRUST);
        assert_eq!(conn.last_interaction, Tick::new(5));
    }

    #[test]
    fn test_disconnect() {
        let mut manager = ConnectionManager::new();
        manager.connect("agent_a", "agent_b", Tick::ZERO);

        assert!(manager.disconnect("agent_a", "agent_b"));
        assert!(manager.get_connection("agent_a", "agent_b").is_none());
        assert!(!manager.disconnect("agent_a", "agent_b"));
        assert!(!manager.disconnect("agent_x", "agent_y"));
    }

    #[test]
    fn test_positive_impact_only_raises() {
        let mut manager = ConnectionManager::new();
        manager.connect("agent_a", "agent_b", Tick::ZERO);

        let interaction = make_interaction(InteractionImpact::new(0.2, 0.3, 0.4));
        manager.record_interaction(&interaction);

        let conn = manager.get_connection("agent_a", "agent_b").unwrap();
        assert!((conn.trust - 0.3).abs() < 1e-6);
        assert!((conn.familiarity - 0.3).abs() < 1e-6);
        assert!((conn.value - 0.4).abs() < 1e-6);
        assert_eq!(conn.last_interaction, Tick::new(10));
    }

    #[test]
    fn test_positive_impact_caps_at_one() {
        let mut manager = ConnectionManager::new();
        manager.connect_with(
            "agent_a",
            "agent_b",
            ConnectionPatch::new()
                .with_trust(0.95)
                .with_familiarity(0.9)
                .with_value(0.99),
            Tick::ZERO,
        );

        let interaction = make_interaction(InteractionImpact::new(0.3, 0.5, 0.8));
        manager.record_interaction(&interaction);

        let conn = manager.get_connection("agent_a", "agent_b").unwrap();
        assert_eq!(conn.trust, 1.0);
        assert_eq!(conn.familiarity, 1.0);
        assert_eq!(conn.value, 1.0);
    }

    #[test]
    fn test_negative_impact_floors_and_spares_familiarity() {
        let mut manager = ConnectionManager::new();
        manager.connect_with(
            "agent_a",
            "agent_b",
            ConnectionPatch::new().with_familiarity(0.7),
            Tick::ZERO,
        );

        let interaction = make_interaction(InteractionImpact::new(-0.5, 0.2, -0.8));
        manager.record_interaction(&interaction);

        let conn = manager.get_connection("agent_a", "agent_b").unwrap();
        assert_eq!(conn.trust, 0.0);
        assert!((conn.value + 0.8).abs() < 1e-6);
        assert_eq!(conn.familiarity, 0.7);

        manager.record_interaction(&make_interaction(InteractionImpact::new(-0.5, 0.0, -0.8)));
        let conn = manager.get_connection("agent_a", "agent_b").unwrap();
        assert_eq!(conn.value, -1.0);
    }

    #[test]
    fn test_record_without_connection_logs_only() {
        let mut manager = ConnectionManager::new();
        let updates = Rc::new(RefCell::new(0));

        let updates_clone = Rc::clone(&updates);
        manager.observe(Topic::ConnectionUpdated, move |_| {
            *updates_clone.borrow_mut() += 1;
        });

        let interaction = make_interaction(InteractionImpact::positive(0.5));
        manager.record_interaction(&interaction);

        assert!(manager.get_connection("agent_a", "agent_b").is_none());
        assert_eq!(manager.history("agent_a", "agent_b").len(), 1);
        assert_eq!(*updates.borrow(), 0);
    }

    #[test]
    fn test_record_after_connect_applies_rules() {
        let mut manager = ConnectionManager::new();
        let updates = Rc::new(RefCell::new(Vec::new()));

        let updates_clone = Rc::clone(&updates);
        manager.observe(Topic::ConnectionUpdated, move |change| {
            if let StateChange::ConnectionUpdated { trust, .. } = change {
                updates_clone.borrow_mut().push(*trust);
            }
        });

        manager.connect("agent_a", "agent_b", Tick::ZERO);
        manager.record_interaction(&make_interaction(InteractionImpact::positive(0.4)));

        let conn = manager.get_connection("agent_a", "agent_b").unwrap();
        assert!((conn.trust - 0.3).abs() < 1e-6);
        assert_eq!(updates.borrow().len(), 1);
        assert!((updates.borrow()[0] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_all_matching_rules_apply_in_order() {
        let mut manager = ConnectionManager::new();
        manager.connect("agent_a", "agent_b", Tick::ZERO);

        manager.add_rule(ImpactRule::new(
            "conversation_trust_bonus",
            |interaction| interaction.kind == InteractionKind::Conversation,
            |_, connection| ConnectionPatch::new().with_trust((connection.trust + 0.05).min(1.0)),
        ));
        assert_eq!(
            manager.rule_names(),
            ["positive_impact", "negative_impact", "conversation_trust_bonus"]
        );

        let interaction = make_interaction(InteractionImpact::new(0.2, 0.1, 0.3));
        manager.record_interaction(&interaction);

        // positive rule first: 0.1 + 0.2 = 0.3, then the bonus on top
        let conn = manager.get_connection("agent_a", "agent_b").unwrap();
        assert!((conn.trust - 0.35).abs() < 1e-6);
    }

    #[test]
    fn test_zero_strength_interaction_still_touches_timestamp() {
        let mut manager = ConnectionManager::new();
        manager.connect("agent_a", "agent_b", Tick::ZERO);

        let interaction = make_interaction(InteractionImpact::new(0.0, 0.0, 0.0));
        manager.record_interaction(&interaction);

        let conn = manager.get_connection("agent_a", "agent_b").unwrap();
        assert_eq!(conn.trust, INITIAL_TRUST);
        assert_eq!(conn.value, 0.0);
        assert_eq!(conn.last_interaction, Tick::new(10));
    }

    #[test]
    fn test_history_is_per_ordered_pair() {
        let mut manager = ConnectionManager::new();

        manager.record_interaction(&make_interaction(InteractionImpact::positive(0.2)));
        manager.record_interaction(&Interaction::new(
            InteractionKind::Conversation,
            "agent_b",
            "agent_a",
            Tick::new(11),
            InteractionImpact::positive(0.2),
        ));

        assert_eq!(manager.history("agent_a", "agent_b").len(), 1);
        assert_eq!(manager.history("agent_b", "agent_a").len(), 1);
        assert!(manager.history("agent_a", "agent_c").is_empty());
    }

    #[test]
    fn test_history_evicts_oldest_beyond_cap() {
        let mut manager = ConnectionManager::new().with_history_cap(2);

        for tick in 1..=4 {
            manager.record_interaction(&Interaction::new(
                InteractionKind::Conversation,
                "agent_a",
                "agent_b",
                Tick::new(tick),
                InteractionImpact::positive(0.1),
            ));
        }

        let history = manager.history("agent_a", "agent_b");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].timestamp, Tick::new(3));
        assert_eq!(history[1].timestamp, Tick::new(4));
    }

    #[test]
    fn test_remove_agent_drops_both_directions() {
        let mut manager = ConnectionManager::new();
        manager.connect("agent_a", "agent_b", Tick::ZERO);
        manager.connect("agent_b", "agent_a", Tick::ZERO);
        manager.connect("agent_c", "agent_b", Tick::ZERO);
        manager.connect("agent_c", "agent_a", Tick::ZERO);
        manager.record_interaction(&make_interaction(InteractionImpact::positive(0.2)));

        manager.remove_agent("agent_b");

        assert!(manager.get_connection("agent_a", "agent_b").is_none());
        assert!(manager.get_connection("agent_b", "agent_a").is_none());
        assert!(manager.get_connection("agent_c", "agent_b").is_none());
        assert!(manager.get_connection("agent_c", "agent_a").is_some());
        assert_eq!(manager.connection_count(), 1);

        // history survives removal
        assert_eq!(manager.history("agent_a", "agent_b").len(), 1);
    }

    #[test]
    fn test_remove_agent_emits_disconnections() {
        let mut manager = ConnectionManager::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_clone = Rc::clone(&seen);
        manager.observe(Topic::Disconnected, move |change| {
            if let StateChange::Disconnected {
                source_id,
                target_id,
            } = change
            {
                seen_clone
                    .borrow_mut()
                    .push(format!("{}->{}", source_id, target_id));
            }
        });

        manager.connect("agent_a", "agent_b", Tick::ZERO);
        manager.connect("agent_b", "agent_c", Tick::ZERO);
        manager.remove_agent("agent_b");

        assert_eq!(
            seen.borrow().as_slice(),
            ["agent_a->agent_b", "agent_b->agent_c"]
        );
    }

    #[test]
    fn test_all_connections_sorted() {
        let mut manager = ConnectionManager::new();
        manager.connect("agent_b", "agent_a", Tick::ZERO);
        manager.connect("agent_a", "agent_c", Tick::ZERO);
        manager.connect("agent_a", "agent_b", Tick::ZERO);

        let pairs: Vec<(String, String)> = manager
            .all_connections()
            .into_iter()
            .map(|(source, target, _)| (source, target))
            .collect();
        assert_eq!(
            pairs,
            [
                ("agent_a".to_string(), "agent_b".to_string()),
                ("agent_a".to_string(), "agent_c".to_string()),
                ("agent_b".to_string(), "agent_a".to_string()),
            ]
        );
    }

    #[test]
    fn test_connect_returns_new_record() {
        let mut manager = ConnectionManager::new();
        let conn = manager.connect_with(
            "agent_a",
            "agent_b",
            ConnectionPatch::new().with_familiarity(0.25),
            Tick::new(7),
        );
        assert_eq!(conn.familiarity, 0.25);
        assert_eq!(conn.last_interaction, Tick::new(7));
    }

    #[test]
    fn test_connections_from_sorted_by_target() {
        let mut manager = ConnectionManager::new();
        manager.connect("agent_a", "agent_c", Tick::ZERO);
        manager.connect("agent_a", "agent_b", Tick::ZERO);
        manager.connect("agent_b", "agent_a", Tick::ZERO);

        let targets: Vec<String> = manager
            .connections_from("agent_a")
            .into_iter()
            .map(|(target, _)| target)
            .collect();
        assert_eq!(targets, ["agent_b", "agent_c"]);
        assert!(manager.connections_from("agent_z").is_empty());
    }

    #[test]
    fn test_sample_interactions_replay() {
        let mut manager = ConnectionManager::new();
        let interactions = psyche_events::fixtures::sample_interactions();

        for interaction in &interactions {
            manager.connect(&interaction.source_id, &interaction.target_id, Tick::ZERO);
        }
        for interaction in &interactions {
            manager.record_interaction(interaction);
        }

        assert_eq!(manager.connection_count(), 6);

        let betrayed = manager.get_connection("agent_voss", "agent_mira").unwrap();
        assert!(betrayed.value < 0.0);
        assert_eq!(betrayed.trust, 0.0);

        let helped = manager.get_connection("agent_sage", "agent_mira").unwrap();
        assert!(helped.value > 0.0);
        assert!(helped.trust > INITIAL_TRUST);

        // history is per ordered pair: betrayal one way, trade the other
        assert_eq!(manager.history("agent_voss", "agent_mira").len(), 1);
        assert_eq!(manager.history("agent_mira", "agent_voss").len(), 1);
    }
}
