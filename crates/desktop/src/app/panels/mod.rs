//! UI panels for the desktop app

mod home;
mod player_card;
mod top;
