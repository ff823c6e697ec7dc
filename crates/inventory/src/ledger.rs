use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use stockroom_core::{Aggregate, DomainError, DomainResult, ItemName, Quantity};

/// Live stock levels: item name to quantity on hand.
///
/// Invariant: every stored quantity is strictly positive. An item whose
/// quantity reaches zero is removed from the map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    stock: BTreeMap<ItemName, u64>,
    version: u64,
}

/// Command: AddStock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddStock {
    pub name: ItemName,
    pub quantity: Quantity,
}

/// Command: RemoveStock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveStock {
    pub name: ItemName,
    pub quantity: Quantity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerCommand {
    AddStock(AddStock),
    RemoveStock(RemoveStock),
}

/// Event: an item entered the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemIntroduced {
    pub name: ItemName,
    pub quantity: u64,
}

/// Event: an existing item gained units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockIncreased {
    pub name: ItemName,
    pub added: u64,
    pub on_hand: u64,
}

/// Event: an item lost units but is still held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockReduced {
    pub name: ItemName,
    pub removed: u64,
    pub on_hand: u64,
}

/// Event: an item's last units left the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub name: ItemName,
    pub removed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    ItemIntroduced(ItemIntroduced),
    StockIncreased(StockIncreased),
    StockReduced(StockReduced),
    ItemRemoved(ItemRemoved),
}

impl LedgerEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            LedgerEvent::ItemIntroduced(_) => "inventory.item.introduced",
            LedgerEvent::StockIncreased(_) => "inventory.item.stock_increased",
            LedgerEvent::StockReduced(_) => "inventory.item.stock_reduced",
            LedgerEvent::ItemRemoved(_) => "inventory.item.removed",
        }
    }
}

/// Successful `add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AddOutcome {
    /// The item was not held before.
    Introduced { name: ItemName, quantity: u64 },
    /// The item was already held; `quantity` is the new total.
    Increased { name: ItemName, added: u64, quantity: u64 },
}

impl AddOutcome {
    pub fn name(&self) -> &ItemName {
        match self {
            AddOutcome::Introduced { name, .. } | AddOutcome::Increased { name, .. } => name,
        }
    }

    pub fn quantity(&self) -> u64 {
        match self {
            AddOutcome::Introduced { quantity, .. } | AddOutcome::Increased { quantity, .. } => {
                *quantity
            }
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, AddOutcome::Introduced { .. })
    }
}

/// Successful `remove`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RemoveOutcome {
    /// Units were taken; the item is still held with `quantity` units.
    Reduced { name: ItemName, removed: u64, quantity: u64 },
    /// Every unit was taken and the item left the ledger.
    Removed { name: ItemName, removed: u64 },
}

impl RemoveOutcome {
    pub fn name(&self) -> &ItemName {
        match self {
            RemoveOutcome::Reduced { name, .. } | RemoveOutcome::Removed { name, .. } => name,
        }
    }

    /// Resulting quantity on hand (0 after full removal).
    pub fn quantity(&self) -> u64 {
        match self {
            RemoveOutcome::Reduced { quantity, .. } => *quantity,
            RemoveOutcome::Removed { .. } => 0,
        }
    }

    pub fn fully_removed(&self) -> bool {
        matches!(self, RemoveOutcome::Removed { .. })
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a seeded ledger.
    ///
    /// Zero quantities are skipped; repeated names accumulate.
    pub fn from_stock<I, S>(pairs: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: AsRef<str>,
    {
        let mut stock: BTreeMap<ItemName, u64> = BTreeMap::new();
        for (raw, qty) in pairs {
            let name = ItemName::parse(raw.as_ref())?;
            if qty < 0 {
                return Err(DomainError::invalid_input(format!(
                    "seed quantity for {name} cannot be negative (got {qty})"
                )));
            }
            if qty == 0 {
                continue;
            }
            let entry = stock.entry(name).or_insert(0);
            *entry = entry
                .checked_add(qty.unsigned_abs())
                .ok_or_else(|| DomainError::invalid_input("seed quantity overflows"))?;
        }
        Ok(Self { stock, version: 0 })
    }

    /// Quantity on hand; 0 when the item is not held.
    pub fn on_hand(&self, name: &str) -> u64 {
        self.stock.get(name.trim()).copied().unwrap_or(0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.stock.contains_key(name.trim())
    }

    /// Number of distinct items held.
    pub fn len(&self) -> usize {
        self.stock.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }

    /// Held items in name order.
    pub fn items(&self) -> impl Iterator<Item = (&ItemName, u64)> + '_ {
        self.stock.iter().map(|(name, qty)| (name, *qty))
    }

    /// Add `qty` units of `name`, introducing the item if it is not held.
    pub fn add(&mut self, name: &str, qty: i64) -> DomainResult<AddOutcome> {
        let name = ItemName::parse(name)?;
        let quantity = Quantity::positive(qty)?;
        let was_held = self.stock.contains_key(&name);

        self.execute_logged(&LedgerCommand::AddStock(AddStock {
            name: name.clone(),
            quantity,
        }))?;

        let on_hand = self.on_hand(name.as_str());
        Ok(if was_held {
            AddOutcome::Increased {
                name,
                added: quantity.get(),
                quantity: on_hand,
            }
        } else {
            AddOutcome::Introduced {
                name,
                quantity: on_hand,
            }
        })
    }

    /// Remove `qty` units of `name`. Taking every unit removes the item.
    pub fn remove(&mut self, name: &str, qty: i64) -> DomainResult<RemoveOutcome> {
        let name = ItemName::parse(name)?;
        let quantity = Quantity::positive(qty)?;

        self.execute_logged(&LedgerCommand::RemoveStock(RemoveStock {
            name: name.clone(),
            quantity,
        }))?;

        Ok(match self.stock.get(&name) {
            Some(&on_hand) => RemoveOutcome::Reduced {
                name,
                removed: quantity.get(),
                quantity: on_hand,
            },
            None => RemoveOutcome::Removed {
                name,
                removed: quantity.get(),
            },
        })
    }

    fn execute_logged(&mut self, command: &LedgerCommand) -> DomainResult<Vec<LedgerEvent>> {
        match self.execute(command) {
            Ok(events) => {
                for event in &events {
                    tracing::debug!(
                        event_type = event.event_type(),
                        version = self.version,
                        "ledger event applied"
                    );
                }
                Ok(events)
            }
            Err(err) => {
                tracing::debug!(kind = %err.kind(), error = %err, "ledger command rejected");
                Err(err)
            }
        }
    }

    fn handle_add(&self, cmd: &AddStock) -> DomainResult<Vec<LedgerEvent>> {
        let added = cmd.quantity.get();
        match self.stock.get(&cmd.name) {
            None => Ok(vec![LedgerEvent::ItemIntroduced(ItemIntroduced {
                name: cmd.name.clone(),
                quantity: added,
            })]),
            Some(&current) => {
                let on_hand = current.checked_add(added).ok_or_else(|| {
                    DomainError::invalid_input(format!("quantity of {} would overflow", cmd.name))
                })?;
                Ok(vec![LedgerEvent::StockIncreased(StockIncreased {
                    name: cmd.name.clone(),
                    added,
                    on_hand,
                })])
            }
        }
    }

    fn handle_remove(&self, cmd: &RemoveStock) -> DomainResult<Vec<LedgerEvent>> {
        let requested = cmd.quantity.get();
        let Some(&current) = self.stock.get(&cmd.name) else {
            return Err(DomainError::not_found(cmd.name.as_str()));
        };

        if requested > current {
            return Err(DomainError::insufficient_stock(
                cmd.name.as_str(),
                requested,
                current,
            ));
        }

        if requested == current {
            return Ok(vec![LedgerEvent::ItemRemoved(ItemRemoved {
                name: cmd.name.clone(),
                removed: requested,
            })]);
        }

        Ok(vec![LedgerEvent::StockReduced(StockReduced {
            name: cmd.name.clone(),
            removed: requested,
            on_hand: current - requested,
        })])
    }
}

impl Aggregate for Ledger {
    type Command = LedgerCommand;
    type Event = LedgerEvent;
    type Error = DomainError;

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match event {
            LedgerEvent::ItemIntroduced(e) => {
                self.stock.insert(e.name.clone(), e.quantity);
            }
            LedgerEvent::StockIncreased(e) => {
                self.stock.insert(e.name.clone(), e.on_hand);
            }
            LedgerEvent::StockReduced(e) => {
                self.stock.insert(e.name.clone(), e.on_hand);
            }
            LedgerEvent::ItemRemoved(e) => {
                self.stock.remove(&e.name);
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            LedgerCommand::AddStock(cmd) => self.handle_add(cmd),
            LedgerCommand::RemoveStock(cmd) => self.handle_remove(cmd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use stockroom_core::ErrorKind;

    fn ledger(pairs: &[(&str, i64)]) -> Ledger {
        Ledger::from_stock(pairs.iter().copied()).unwrap()
    }

    fn snapshot(ledger: &Ledger) -> Vec<(String, u64)> {
        ledger
            .items()
            .map(|(name, qty)| (name.to_string(), qty))
            .collect()
    }

    #[test]
    fn add_introduces_new_item() {
        let mut l = Ledger::new();
        let outcome = l.add("C", 3).unwrap();

        assert!(outcome.is_new());
        assert_eq!(outcome.quantity(), 3);
        assert_eq!(snapshot(&l), vec![("C".to_string(), 3)]);
    }

    #[test]
    fn add_increases_existing_item() {
        let mut l = ledger(&[("Laptop Dell", 2)]);
        let outcome = l.add("  Laptop Dell ", 5).unwrap();

        assert_eq!(
            outcome,
            AddOutcome::Increased {
                name: ItemName::parse("Laptop Dell").unwrap(),
                added: 5,
                quantity: 7,
            }
        );
        assert_eq!(l.on_hand("Laptop Dell"), 7);
        assert_eq!(l.len(), 1);
    }

    #[test]
    fn add_rejects_blank_name_and_non_positive_quantity() {
        let mut l = Ledger::new();
        assert_eq!(l.add("   ", 1).unwrap_err().kind(), ErrorKind::InvalidInput);
        assert_eq!(l.add("A", 0).unwrap_err().kind(), ErrorKind::InvalidInput);
        assert_eq!(l.add("A", -4).unwrap_err().kind(), ErrorKind::InvalidInput);
        assert!(l.is_empty());
        assert_eq!(l.version(), 0);
    }

    #[test]
    fn add_rejects_overflow_without_mutating() {
        let mut l = Ledger::new();
        l.add("A", i64::MAX).unwrap();
        l.add("A", i64::MAX).unwrap();
        let before = l.clone();

        let err = l.add("A", 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(l, before);
    }

    #[test]
    fn remove_exact_quantity_deletes_item() {
        let mut l = ledger(&[("D", 8)]);
        let outcome = l.remove("D", 8).unwrap();

        assert!(outcome.fully_removed());
        assert_eq!(outcome.quantity(), 0);
        assert!(!l.contains("D"));
        assert!(l.is_empty());
    }

    #[test]
    fn remove_partial_quantity_keeps_item() {
        let mut l = ledger(&[("D", 8)]);
        let outcome = l.remove("D", 3).unwrap();

        assert!(!outcome.fully_removed());
        assert_eq!(outcome.quantity(), 5);
        assert_eq!(l.on_hand("D"), 5);
    }

    #[test]
    fn remove_more_than_on_hand_is_insufficient_stock() {
        let mut l = ledger(&[("D", 8)]);
        let err = l.remove("D", 9).unwrap_err();

        assert_eq!(err, DomainError::insufficient_stock("D", 9, 8));
        assert_eq!(snapshot(&l), vec![("D".to_string(), 8)]);
        assert_eq!(l.version(), 0);
    }

    #[test]
    fn remove_absent_item_is_not_found() {
        let mut l = ledger(&[("D", 8)]);
        let before = l.clone();

        let err = l.remove("E", 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(l, before);
    }

    #[test]
    fn remove_validates_quantity_before_lookup() {
        let mut l = Ledger::new();
        assert_eq!(l.remove("ghost", 0).unwrap_err().kind(), ErrorKind::InvalidInput);
        assert_eq!(l.remove("", 1).unwrap_err().kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn seeding_skips_zero_and_accumulates_duplicates() {
        let l = ledger(&[("A", 0), ("B", 2), ("B", 3)]);
        assert_eq!(snapshot(&l), vec![("B".to_string(), 5)]);

        let err = Ledger::from_stock([("A", -1)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let l = ledger(&[("A", 4)]);
        let before = l.clone();

        let cmd = LedgerCommand::RemoveStock(RemoveStock {
            name: ItemName::parse("A").unwrap(),
            quantity: Quantity::positive(4).unwrap(),
        });
        let events1 = l.handle(&cmd).unwrap();
        let events2 = l.handle(&cmd).unwrap();

        assert_eq!(l, before);
        assert_eq!(events1, events2);
    }

    #[test]
    fn version_increments_per_applied_event() {
        let mut l = Ledger::new();
        l.add("A", 1).unwrap();
        l.add("A", 1).unwrap();
        l.remove("A", 2).unwrap();
        assert_eq!(l.version(), 3);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: add then query yields the prior amount plus qty.
        #[test]
        fn add_increments_on_hand(
            prior in 0i64..10_000,
            qty in 1i64..10_000,
            name in "[A-Za-z][A-Za-z0-9 ]{0,20}"
        ) {
            let mut l = Ledger::from_stock([(name.as_str(), prior)]).unwrap();
            let before = l.on_hand(&name);
            let outcome = l.add(&name, qty).unwrap();

            prop_assert_eq!(l.on_hand(&name), before + qty as u64);
            prop_assert_eq!(outcome.quantity(), before + qty as u64);
            prop_assert_eq!(outcome.is_new(), prior == 0);
        }

        /// Property: removing the full quantity leaves no entry behind.
        #[test]
        fn full_removal_deletes_key(q in 1i64..10_000) {
            let mut l = Ledger::from_stock([("X", q), ("Y", 1)]).unwrap();
            let outcome = l.remove("X", q).unwrap();

            prop_assert!(outcome.fully_removed());
            prop_assert!(!l.contains("X"));
            prop_assert!(l.items().all(|(_, qty)| qty > 0));
        }

        /// Property: removing more than on hand fails and changes nothing.
        #[test]
        fn over_removal_is_rejected(q in 1i64..10_000, extra in 1i64..10_000) {
            let mut l = Ledger::from_stock([("X", q)]).unwrap();
            let before = l.clone();

            let err = l.remove("X", q + extra).unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::InsufficientStock);
            prop_assert_eq!(l, before);
        }

        /// Property: no sequence of operations leaves a zero-quantity entry.
        #[test]
        fn no_zero_entries_persist(
            ops in prop::collection::vec((0usize..3, 1i64..20, any::<bool>()), 1..40)
        ) {
            let names = ["A", "B", "C"];
            let mut l = Ledger::new();
            for (idx, qty, is_add) in ops {
                if is_add {
                    let _ = l.add(names[idx], qty);
                } else {
                    let _ = l.remove(names[idx], qty);
                }
                prop_assert!(l.items().all(|(_, q)| q > 0));
            }
        }
    }
}
