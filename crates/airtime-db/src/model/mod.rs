pub mod scheduled_track;
