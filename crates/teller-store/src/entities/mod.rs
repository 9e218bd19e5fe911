//! Database entities

pub mod person;
pub mod person_type_person;
pub mod type_person;
pub mod user;

pub use person::Entity as Person;
pub use person_type_person::Entity as PersonTypePerson;
pub use type_person::Entity as TypePerson;
pub use user::Entity as User;

pub mod prelude {
    pub use super::person::Entity as Person;
    pub use super::person_type_person::Entity as PersonTypePerson;
    pub use super::type_person::Entity as TypePerson;
    pub use super::user::Entity as User;
}
