//! A tiny compile-time dependency provider.
//!
//! Services derive [`Build`], which constructs every field from the provider
//! (or from [`Default`] for fields marked `#[state]`). Built values are cached
//! per provider, so every consumer of a service receives a clone of the same
//! instance.

pub use intake_di_derive::Build;
pub use typemap::TypeMap;

mod macros;
mod typemap;

pub trait Provider: Sized {
    /// The cache of values which have already been built by this provider.
    fn cache(&mut self) -> &mut TypeMap;
}

#[diagnostic::on_unimplemented(
    message = "The type `{Self}` cannot be built using the provider `{P}`",
    note = "Add `{Self}` to the provider `{P}` or implement `Build` for `{Self}` and make sure \
            all dependencies are satisfied"
)]
pub trait Build<P: Provider>: Clone + 'static {
    fn build(provider: &mut P) -> Self;
}

pub trait Provides: Provider {
    fn provide<T: Build<Self>>(&mut self) -> T {
        T::build(self)
    }
}

impl<P: Provider> Provides for P {}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;

    #[derive(Clone)]
    struct Counter(Arc<AtomicUsize>);

    #[derive(Clone)]
    struct Service {
        counter: Counter,
        id: usize,
    }

    impl<P: Provider> Build<P> for Service
    where
        Counter: Build<P>,
    {
        fn build(provider: &mut P) -> Self {
            if let Some(cached) = provider.cache().get::<Self>() {
                return cached.clone();
            }
            let counter = Counter::build(provider);
            let id = counter.0.fetch_add(1, Ordering::Relaxed);
            let built = Self { counter, id };
            provider.cache().insert(built.clone());
            built
        }
    }

    crate::provider! {
        TestProvider {
            counter: Counter,
        }
    }

    #[test]
    fn provided_services_are_cached() {
        let mut provider = TestProvider {
            _cache: Default::default(),
            counter: Counter(Arc::new(AtomicUsize::new(0))),
        };

        let a: Service = provider.provide();
        let b: Service = provider.provide();

        assert_eq!(a.id, 0);
        assert_eq!(b.id, 0);
        assert_eq!(a.counter.0.load(Ordering::Relaxed), 1);
    }
}
