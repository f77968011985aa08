//! Fixture data shared by the unit tests.

use std::fs;
use std::path::Path;

use crate::filter::City;

/// Twelve trips between January and June 2017. Rows 3, 7 and 9 have no
/// demographic data.
pub const FIXTURE_CSV: &str = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
2017-01-02 09:00:00,2017-01-02 09:10:00,600,Clark St,Lake St,Subscriber,Male,1980
2017-01-03 09:30:00,2017-01-03 09:35:00,300,Clark St,State St,Subscriber,Female,1990
2017-04-03 17:05:00,2017-04-03 17:25:00,1200,Clark St,State St,Customer,,
2017-04-04 17:10:00,2017-04-04 17:25:00,900,State St,Lake St,Subscriber,Male,1990
2017-04-10 08:00:00,2017-04-10 08:01:00,60,Lake St,Clark St,Subscriber,Female,1985
2017-05-01 17:45:00,2017-05-01 17:52:00,420,Clark St,Lake St,Subscriber,Male,1990
2017-06-05 07:15:00,2017-06-05 07:28:00,780,State St,Lake St,Customer,,
2017-06-06 17:20:00,2017-06-06 17:24:00,240,Clark St,Lake St,Subscriber,Female,1975
2017-02-05 12:00:00,2017-02-05 12:25:00,1500,Lake St,State St,Customer,,
2017-03-11 17:30:00,2017-03-11 17:36:00,360,Clark St,Lake St,Subscriber,Male,2001
2017-04-17 08:30:00,2017-04-17 08:39:00,540,Clark St,Lake St,Subscriber,Male,1990
2017-04-21 17:55:00,2017-04-21 18:05:00,600,State St,Clark St,Subscriber,Female,1992
";

/// The fixture with the Gender and Birth Year columns dropped.
pub fn without_demographics(csv: &str) -> String {
    csv.lines()
        .map(|line| line.splitn(7, ',').take(6).collect::<Vec<_>>().join(","))
        .collect::<Vec<_>>()
        .join("\n")
        + "\n"
}

pub fn write_fixture(dir: &Path, city: City, csv: &str) -> std::io::Result<()> {
    fs::write(dir.join(city.file_name()), csv)
}

pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}
