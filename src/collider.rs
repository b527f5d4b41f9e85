//! Collision proxies for shapes.
//!
//! Shapes don't own their colliders. A host keeps them, keyed by the string form of the shape
//! id, and shapes update theirs through [`Shape::project_collider`](crate::shape::Shape).

use cgmath::Vector2;

/// A circular collision proxy.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleCollider {
    /// Key of the owning shape.
    pub name: String,
    pub offset: Vector2<f64>,
    pub radius: f64,
}

/// Handle to a collider inside a [`ColliderHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColliderId(pub usize);

/// Something that stores colliders for shapes.
pub trait ColliderHost {
    /// Finds the collider with the given key. If several match, the last one is returned.
    fn find_collider(&self, key: &str) -> Option<ColliderId>;

    /// Creates a new collider with the given key and a zero offset and radius.
    fn create_collider(&mut self, key: &str) -> ColliderId;

    fn collider_mut(&mut self, id: ColliderId) -> Option<&mut CircleCollider>;

    /// Returns the collider with the given key, creating it if there is none.
    fn find_or_create(&mut self, key: &str) -> ColliderId {
        match self.find_collider(key) {
            Some(id) => id,
            None => {
                debug!(target: "vecshape", "creating collider for {}", key);
                self.create_collider(key)
            }
        }
    }

    /// Sets the offset and radius of the collider with the given key.
    fn project_circle(&mut self, key: &str, offset: Vector2<f64>, radius: f64) {
        let id = self.find_or_create(key);
        match self.collider_mut(id) {
            Some(collider) => {
                collider.offset = offset;
                collider.radius = radius;
            }
            None => warn!(target: "vecshape", "collider {:?} for {} vanished", id, key),
        }
    }
}

/// A plain list of colliders.
#[derive(Debug, Clone, Default)]
pub struct ColliderSet {
    colliders: Vec<CircleCollider>,
}

impl ColliderSet {
    pub fn new() -> ColliderSet {
        ColliderSet::default()
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    pub fn colliders(&self) -> &[CircleCollider] {
        &self.colliders
    }

    pub fn get(&self, key: &str) -> Option<&CircleCollider> {
        self.colliders.iter().rev().find(|c| c.name == key)
    }

    /// Removes every collider with the given key.
    pub fn remove(&mut self, key: &str) {
        self.colliders.retain(|c| c.name != key);
    }
}

impl ColliderHost for ColliderSet {
    fn find_collider(&self, key: &str) -> Option<ColliderId> {
        self.colliders
            .iter()
            .rposition(|c| c.name == key)
            .map(ColliderId)
    }

    fn create_collider(&mut self, key: &str) -> ColliderId {
        self.colliders.push(CircleCollider {
            name: key.to_string(),
            offset: Vector2::new(0., 0.),
            radius: 0.,
        });
        ColliderId(self.colliders.len() - 1)
    }

    fn collider_mut(&mut self, id: ColliderId) -> Option<&mut CircleCollider> {
        self.colliders.get_mut(id.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_once_then_updates() {
        let mut set = ColliderSet::new();
        assert!(set.is_empty());

        set.project_circle("a", Vector2::new(1., 2.), 3.);
        set.project_circle("a", Vector2::new(4., 5.), 6.);
        assert_eq!(set.len(), 1);
        assert_eq!(set.colliders()[0].offset, Vector2::new(4., 5.));
        assert_eq!(set.colliders()[0].radius, 6.);

        set.project_circle("b", Vector2::new(0., 0.), 1.);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("b").map(|c| c.radius), Some(1.));
    }

    #[test]
    fn last_duplicate_wins() {
        let mut set = ColliderSet::new();
        set.create_collider("a");
        set.create_collider("a");
        assert_eq!(set.find_collider("a"), Some(ColliderId(1)));

        set.project_circle("a", Vector2::new(1., 1.), 2.);
        assert_eq!(set.colliders()[0].radius, 0.);
        assert_eq!(set.colliders()[1].radius, 2.);

        set.remove("a");
        assert!(set.is_empty());
        assert_eq!(set.find_collider("a"), None);
    }
}
