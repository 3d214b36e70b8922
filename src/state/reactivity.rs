// ============================================================================
// REACTIVITY - Sistema de notificaciones/subscribers para reactividad
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

type Subscriber<T> = Rc<dyn Fn(&T)>;

/// Estado reactivo con sistema de notificaciones
pub struct ReactiveState<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<Subscriber<T>>>,
}

impl<T: Clone> ReactiveState<T> {
    /// Crear nuevo estado reactivo
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            subscribers: RefCell::new(Vec::new()),
        }
    }

    /// Copia del valor actual
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Establecer nuevo valor y notificar subscribers
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Actualizar valor usando closure y notificar
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        updater(&mut *self.value.borrow_mut());
        self.notify();
    }

    /// Suscribirse a cambios
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&T) + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Notificar a todos los subscribers (sin préstamos activos durante la llamada)
    fn notify(&self) {
        let snapshot = self.get();
        let subscribers: Vec<Subscriber<T>> = self.subscribers.borrow().clone();
        for callback in subscribers {
            callback(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_set_notifies_with_new_value() {
        let state = ReactiveState::new(1);
        let seen = Rc::new(Cell::new(0));
        let seen_clone = seen.clone();
        state.subscribe(move |v| seen_clone.set(*v));
        state.set(5);
        assert_eq!(seen.get(), 5);
        state.update(|v| *v += 1);
        assert_eq!(seen.get(), 6);
        assert_eq!(state.get(), 6);
    }

    #[test]
    fn test_subscriber_may_read_state() {
        let state = Rc::new(ReactiveState::new(String::from("a")));
        let inner = state.clone();
        let reads = Rc::new(Cell::new(0));
        let reads_clone = reads.clone();
        state.subscribe(move |_| {
            let _ = inner.get();
            reads_clone.set(reads_clone.get() + 1);
        });
        state.set(String::from("b"));
        assert_eq!(reads.get(), 1);
    }
}
