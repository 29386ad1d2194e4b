pub mod games;
pub mod rounds;
pub mod team_members;
pub mod teams;
pub mod turns;
pub mod users;
pub mod words;

pub use games::Entity as Games;
pub use rounds::Entity as Rounds;
pub use team_members::Entity as TeamMembers;
pub use teams::Entity as Teams;
pub use turns::Entity as Turns;
pub use users::Entity as Users;
pub use words::Entity as Words;
