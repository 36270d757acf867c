// src/output.rs
use std::fs::File;
use std::io::{self, Write};

use crate::trajectory::Trajectory;

pub fn write_trajectory_to_csv(filename: &str, trajectory: &Trajectory) -> io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(file, "step,time,state")?;
    for (k, (t, s)) in trajectory.times.iter().zip(&trajectory.states).enumerate() {
        writeln!(file, "{},{},{}", k, t, s)?;
    }
    Ok(())
}

pub fn write_stationary_to_csv(filename: &str, probabilities: &[f64]) -> io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(file, "state,probability")?;
    for (i, p) in probabilities.iter().enumerate() {
        writeln!(file, "{},{}", i, p)?;
    }
    Ok(())
}
