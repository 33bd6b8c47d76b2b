//! Teams domain layer: entities and their document shapes

pub mod entities;
