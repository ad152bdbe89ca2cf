use crate::actor_framework::{Entity, FrameworkError};
use crate::domain::{User, UserCreate, UserPatch};

/// `max(existing ids) + 1`, or `1` for an empty store.
///
/// Deleting the highest id and creating again hands that id out a second time.
pub fn next_user_id(users: &[User]) -> u64 {
    users.iter().map(|u| u.id).max().map_or(1, |max| max + 1)
}

fn email_label(email: &Option<String>) -> String {
    email.clone().unwrap_or_else(|| "null".to_string())
}

impl Entity for User {
    type Id = u64;
    type CreatePayload = UserCreate;
    type Patch = UserPatch;

    fn id(&self) -> &u64 {
        &self.id
    }

    fn from_create(id: u64, payload: UserCreate) -> Result<Self, FrameworkError> {
        Ok(Self {
            id,
            name: payload.name,
            email: payload.email,
        })
    }

    /// Emails must be unique across the store (exact, case-sensitive match).
    /// Two null emails count as equal.
    fn before_create(store: &[Self], payload: &UserCreate) -> Result<(), FrameworkError> {
        if store.iter().any(|u| u.email == payload.email) {
            return Err(FrameworkError::Conflict(email_label(&payload.email)));
        }
        Ok(())
    }

    /// Rejects an email already held by another user. A patch without
    /// recognised fields passes and changes nothing.
    fn before_update(&self, store: &[Self], patch: &UserPatch) -> Result<(), FrameworkError> {
        if let Some(email) = &patch.email {
            if store.iter().any(|u| u.id != self.id && &u.email == email) {
                return Err(FrameworkError::Conflict(email_label(email)));
            }
        }
        Ok(())
    }

    /// Updates the user's profile information.
    ///
    /// # Fields Updated
    /// - `name`: User's display name
    /// - `email`: User's email address
    fn on_update(&mut self, patch: UserPatch) -> Result<(), FrameworkError> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_id_follows_the_maximum() {
        assert_eq!(next_user_id(&[]), 1);
        assert_eq!(next_user_id(&User::seed()), 4);

        let gappy = vec![User::new(9, "a", "a@x"), User::new(2, "b", "b@x")];
        assert_eq!(next_user_id(&gappy), 10);
    }

    #[test]
    fn duplicate_email_is_rejected_on_create() {
        let store = User::seed();
        let err = User::before_create(&store, &UserCreate::new("x", "lisi@example.com")).unwrap_err();
        assert_eq!(err, FrameworkError::Conflict("lisi@example.com".to_string()));

        // case-sensitive
        assert!(User::before_create(&store, &UserCreate::new("x", "LISI@example.com")).is_ok());
    }

    #[test]
    fn keeping_own_email_is_not_a_conflict() {
        let store = User::seed();
        let patch = UserPatch::email("zhangsan@example.com");
        assert!(store[0].before_update(&store, &patch).is_ok());
        assert!(matches!(
            store[1].before_update(&store, &patch),
            Err(FrameworkError::Conflict(_))
        ));
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let store = User::seed();
        assert!(store[0].before_update(&store, &UserPatch::default()).is_ok());

        let mut user = store[0].clone();
        user.on_update(UserPatch::default()).unwrap();
        assert_eq!(user, store[0]);
    }

    #[test]
    fn null_emails_collide_with_each_other() {
        let mut store = User::seed();
        store[2].email = None;
        let payload = UserCreate {
            name: Some("x".to_string()),
            email: None,
        };
        assert_eq!(
            User::before_create(&store, &payload),
            Err(FrameworkError::Conflict("null".to_string()))
        );
    }

    #[test]
    fn on_update_only_touches_supplied_fields() {
        let mut user = User::new(1, "a", "a@x.com");
        user.on_update(UserPatch::name("b")).unwrap();
        assert_eq!(user, User::new(1, "b", "a@x.com"));

        user.on_update(UserPatch::email("c@x.com")).unwrap();
        assert_eq!(user, User::new(1, "b", "c@x.com"));

        user.on_update(UserPatch {
            name: Some(None),
            email: None,
        })
        .unwrap();
        assert_eq!(user.name, None);
        assert_eq!(user.email.as_deref(), Some("c@x.com"));
    }
}
