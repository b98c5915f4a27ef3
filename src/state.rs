use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::filter::FilterCriteria;

type Callback = Box<dyn FnMut(&FilterCriteria)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct Cell {
    criteria: FilterCriteria,
    revision: u64,
    next_subscription: u64,
    subscribers: Vec<(SubscriptionId, Callback)>,
    dispatching: Vec<SubscriptionId>,
    dropped_while_dispatching: Vec<SubscriptionId>,
}

pub struct SharedFilterState;

impl SharedFilterState {
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> (FilterWriter, FilterReader) {
        let cell = Rc::new(RefCell::new(Cell::default()));
        (
            FilterWriter {
                cell: Rc::clone(&cell),
            },
            FilterReader { cell },
        )
    }
}

pub struct FilterWriter {
    cell: Rc<RefCell<Cell>>,
}

impl FilterWriter {
    pub fn set(&mut self, criteria: FilterCriteria) {
        let mut subscribers = {
            let mut cell = self.cell.borrow_mut();
            cell.criteria = criteria;
            cell.revision += 1;
            debug!(revision = cell.revision, criteria = ?cell.criteria, "filter criteria committed");
            let subscribers = std::mem::take(&mut cell.subscribers);
            cell.dispatching = subscribers.iter().map(|(id, _)| *id).collect();
            subscribers
        };

        let committed = self.cell.borrow().criteria.clone();
        for (id, callback) in &mut subscribers {
            if self.cell.borrow().dropped_while_dispatching.contains(id) {
                continue;
            }
            callback(&committed);
        }

        let mut cell = self.cell.borrow_mut();
        let dropped = std::mem::take(&mut cell.dropped_while_dispatching);
        cell.dispatching.clear();
        subscribers.retain(|(id, _)| !dropped.contains(id));
        subscribers.append(&mut cell.subscribers);
        cell.subscribers = subscribers;
    }

    pub fn reader(&self) -> FilterReader {
        FilterReader {
            cell: Rc::clone(&self.cell),
        }
    }
}

#[derive(Clone)]
pub struct FilterReader {
    cell: Rc<RefCell<Cell>>,
}

impl FilterReader {
    pub fn current(&self) -> FilterCriteria {
        self.cell.borrow().criteria.clone()
    }

    pub fn revision(&self) -> u64 {
        self.cell.borrow().revision
    }

    pub fn subscribe(&self, callback: impl FnMut(&FilterCriteria) + 'static) -> SubscriptionId {
        let mut cell = self.cell.borrow_mut();
        let id = SubscriptionId(cell.next_subscription);
        cell.next_subscription += 1;
        cell.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut cell = self.cell.borrow_mut();
        let before = cell.subscribers.len();
        cell.subscribers.retain(|(subscription, _)| *subscription != id);
        if cell.subscribers.len() != before {
            return true;
        }

        // Callbacks are detached from the cell while `set` runs them.
        if cell.dispatching.contains(&id) && !cell.dropped_while_dispatching.contains(&id) {
            cell.dropped_while_dispatching.push(id);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyword(value: &str) -> FilterCriteria {
        FilterCriteria {
            keyword: value.to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn starts_empty() {
        let (_writer, reader) = SharedFilterState::new();
        assert!(reader.current().is_empty());
        assert_eq!(reader.revision(), 0);
    }

    #[test]
    fn readers_see_latest_write() {
        let (mut writer, reader) = SharedFilterState::new();
        let other = reader.clone();

        writer.set(keyword("bone"));
        writer.set(keyword("heart"));

        assert_eq!(reader.current().keyword, "heart");
        assert_eq!(other.current().keyword, "heart");
        assert_eq!(other.revision(), 2);
    }

    #[test]
    fn subscribers_are_notified_synchronously() {
        let (mut writer, reader) = SharedFilterState::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let observer = reader.clone();
        reader.subscribe(move |criteria| {
            assert_eq!(observer.current(), *criteria);
            sink.borrow_mut().push(criteria.keyword.clone());
        });

        writer.set(keyword("bone"));
        assert_eq!(*seen.borrow(), ["bone"]);
    }

    #[test]
    fn unsubscribed_callbacks_stop_firing() {
        let (mut writer, reader) = SharedFilterState::new();
        let count = Rc::new(RefCell::new(0));

        let counter = Rc::clone(&count);
        let id = reader.subscribe(move |_| *counter.borrow_mut() += 1);
        writer.set(keyword("a"));
        assert!(reader.unsubscribe(id));
        writer.set(keyword("b"));

        assert_eq!(*count.borrow(), 1);
        assert!(!reader.unsubscribe(id));
    }

    #[test]
    fn subscribing_during_notification_is_kept() {
        let (mut writer, reader) = SharedFilterState::new();
        let late_calls = Rc::new(RefCell::new(0));

        let registrar = reader.clone();
        let late = Rc::clone(&late_calls);
        let mut registered = false;
        reader.subscribe(move |_| {
            if !registered {
                registered = true;
                let late = Rc::clone(&late);
                registrar.subscribe(move |_| *late.borrow_mut() += 1);
            }
        });

        writer.set(keyword("first"));
        writer.set(keyword("second"));
        assert_eq!(*late_calls.borrow(), 1);
    }

    #[test]
    fn unsubscribing_from_inside_a_callback_sticks() {
        let (mut writer, reader) = SharedFilterState::new();
        let calls = Rc::new(RefCell::new(0));
        let own_id = Rc::new(RefCell::new(None));
        let removed = Rc::new(RefCell::new(None));

        let handle = reader.clone();
        let counter = Rc::clone(&calls);
        let slot = Rc::clone(&own_id);
        let outcome = Rc::clone(&removed);
        let id = reader.subscribe(move |_| {
            *counter.borrow_mut() += 1;
            if let Some(id) = slot.borrow_mut().take() {
                *outcome.borrow_mut() = Some(handle.unsubscribe(id));
            }
        });
        *own_id.borrow_mut() = Some(id);

        writer.set(keyword("first"));
        writer.set(keyword("second"));

        assert_eq!(*removed.borrow(), Some(true));
        assert_eq!(*calls.borrow(), 1);
        assert!(!reader.unsubscribe(id));
    }

    #[test]
    fn unsubscribing_a_later_subscriber_mid_dispatch_skips_it() {
        let (mut writer, reader) = SharedFilterState::new();
        let later_calls = Rc::new(RefCell::new(0));
        let target = Rc::new(RefCell::new(None));

        let handle = reader.clone();
        let slot = Rc::clone(&target);
        reader.subscribe(move |_| {
            if let Some(id) = slot.borrow_mut().take() {
                assert!(handle.unsubscribe(id));
            }
        });
        let counter = Rc::clone(&later_calls);
        let later = reader.subscribe(move |_| *counter.borrow_mut() += 1);
        *target.borrow_mut() = Some(later);

        writer.set(keyword("first"));
        writer.set(keyword("second"));
        assert_eq!(*later_calls.borrow(), 0);
    }
}
