pub mod comments;
pub mod games;
pub mod participants;
pub mod sports;
pub mod user_favorite_sports;
pub mod users;

pub use comments::Entity as Comments;
pub use comments::Model as Comment;
pub use games::Entity as Games;
pub use games::Model as Game;
pub use participants::Entity as Participants;
pub use participants::Model as Participant;
pub use sports::Entity as Sports;
pub use sports::Model as Sport;
pub use user_favorite_sports::Entity as UserFavoriteSports;
pub use users::Entity as Users;
pub use users::Model as User;
