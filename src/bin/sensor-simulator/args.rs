use chrono_tz::Tz;
use clap::Parser;
use home_sensor_simulator::sink::InfluxDbConfig;

#[derive(Debug, Parser)]
#[command(about = "Writes synthetic home sensor readings to a time-series store")]
pub struct Args {
    #[arg(long, env = "INFLUXDB_URL", default_value = "")]
    pub influxdb_url: String,

    #[arg(long, env = "INFLUXDB_TOKEN", default_value = "", hide_env_values = true)]
    pub influxdb_token: String,

    #[arg(long, env = "INFLUXDB_ORG", default_value = "")]
    pub influxdb_org: String,

    #[arg(long, env = "INFLUXDB_BUCKET", default_value = "")]
    pub influxdb_bucket: String,

    /// Write to Postgres instead of InfluxDB.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Zone used for the hour of day; local time when unset.
    #[arg(long, env = "TZ")]
    pub timezone: Option<Tz>,
}

impl Args {
    pub fn influxdb_config(&self) -> InfluxDbConfig {
        InfluxDbConfig {
            url: self.influxdb_url.clone(),
            token: self.influxdb_token.clone(),
            org: self.influxdb_org.clone(),
            bucket: self.influxdb_bucket.clone(),
        }
    }
}
