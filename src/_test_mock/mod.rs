pub mod checkin_mock;
