//! Replay-latest, multi-subscriber value cell.
//!
//! A subscriber is called immediately with the current value (if any) and
//! then on every `publish`. Derived observables (`map`, `combine`) recompute
//! whenever one of their sources publishes. Single-threaded: subscribers must
//! not publish on the observable that is notifying them.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback<T> = Box<dyn FnMut(&T)>;

struct Inner<T> {
    latest: Option<T>,
    subscribers: Vec<(u64, Callback<T>)>,
    next_id: u64,
}

pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

impl<T: Clone + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> Observable<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                latest: None,
                subscribers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    pub fn with_value(value: T) -> Self {
        let obs = Self::new();
        obs.inner.borrow_mut().latest = Some(value);
        obs
    }

    pub fn latest(&self) -> Option<T> {
        self.inner.borrow().latest.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    pub fn publish(&self, value: T) {
        // Detach the callbacks while they run so they may read `latest()`.
        let mut subscribers = {
            let mut inner = self.inner.borrow_mut();
            inner.latest = Some(value.clone());
            std::mem::take(&mut inner.subscribers)
        };

        for (_, cb) in subscribers.iter_mut() {
            cb(&value);
        }

        let mut inner = self.inner.borrow_mut();
        // keep subscriptions added during notification
        subscribers.append(&mut inner.subscribers);
        inner.subscribers = subscribers;
    }

    pub fn subscribe<F>(&self, mut callback: F) -> SubscriptionId
    where
        F: FnMut(&T) + 'static,
    {
        if let Some(v) = self.latest() {
            callback(&v);
        }

        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push((id, Box::new(callback)));
        SubscriptionId(id)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner
            .borrow_mut()
            .subscribers
            .retain(|(sid, _)| *sid != id.0);
    }

    /// Derived observable recomputed on every publish of `self`.
    pub fn map<U, F>(&self, f: F) -> Observable<U>
    where
        U: Clone + 'static,
        F: Fn(&T) -> U + 'static,
    {
        let out = Observable::new();
        let sink = out.clone();
        self.subscribe(move |v| sink.publish(f(v)));
        out
    }

    /// Derived observable over two sources; it emits once both have a value
    /// and again whenever either of them publishes. Each source only keeps a
    /// weak handle on the other, so no reference cycle is formed.
    pub fn combine<U, V, F>(&self, other: &Observable<U>, f: F) -> Observable<V>
    where
        U: Clone + 'static,
        V: Clone + 'static,
        F: Fn(&T, &U) -> V + 'static,
    {
        let out = Observable::new();
        let f = Rc::new(f);

        {
            let sink = out.clone();
            let other = Rc::downgrade(&other.inner);
            let f = Rc::clone(&f);
            self.subscribe(move |a| {
                let b = other.upgrade().and_then(|o| o.borrow().latest.clone());
                if let Some(b) = b {
                    sink.publish((*f)(a, &b));
                }
            });
        }
        {
            let sink = out.clone();
            let this: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.inner);
            other.subscribe(move |b| {
                let a = this.upgrade().and_then(|t| t.borrow().latest.clone());
                if let Some(a) = a {
                    sink.publish((*f)(&a, b));
                }
            });
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn late_subscribers_get_the_latest_value() {
        let obs = Observable::with_value(1);
        obs.publish(2);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        obs.subscribe(move |v| s.borrow_mut().push(*v));
        obs.publish(3);

        assert_eq!(*seen.borrow(), vec![2, 3]);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let obs = Observable::new();
        let count = Rc::new(RefCell::new(0));
        let c = Rc::clone(&count);
        let id = obs.subscribe(move |_: &i32| *c.borrow_mut() += 1);

        obs.publish(1);
        obs.unsubscribe(id);
        obs.publish(2);

        assert_eq!(*count.borrow(), 1);
        assert_eq!(obs.subscriber_count(), 0);
    }

    #[test]
    fn map_and_combine_recompute() {
        let numbers = Observable::with_value(vec![1, 2, 3]);
        let factor = Observable::new();

        let total = numbers.map(|v: &Vec<i32>| v.iter().sum::<i32>());
        let scaled = total.combine(&factor, |t: &i32, f: &i32| t * f);

        assert_eq!(total.latest(), Some(6));
        assert_eq!(scaled.latest(), None);

        factor.publish(10);
        assert_eq!(scaled.latest(), Some(60));

        numbers.publish(vec![5]);
        assert_eq!(scaled.latest(), Some(50));
    }
}
