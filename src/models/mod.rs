mod client;

pub use client::{Client, ClientFields, HairColor, UnknownHairColor};
