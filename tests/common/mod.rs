//! Synthetic VizSchema dumps for integration tests.

#![allow(dead_code)]

use hdf5::types::VarLenUnicode;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// One synthetic `<base>_<step>.h5` dump
pub struct Dump<'a> {
    pub step: i64,
    pub power: &'a [f64],
    pub time: f64,
    pub zbar: Option<f64>,
    pub bounds: (f64, f64),
    pub run_info: bool,
}

impl<'a> Dump<'a> {
    pub fn new(step: i64, power: &'a [f64], time: f64) -> Self {
        Self {
            step,
            power,
            time,
            zbar: Some(time * 10.0),
            bounds: (0.0, 3.0),
            run_info: true,
        }
    }

    pub fn without_zbar(mut self) -> Self {
        self.zbar = None;
        self
    }

    pub fn without_run_info(mut self) -> Self {
        self.run_info = false;
        self
    }
}

pub const BASE_NAME: &str = "fig7_main_0_integrated";
pub const RUN_ID: &str = "fig7_main_0_integrated_0";

pub fn text(s: &str) -> VarLenUnicode {
    VarLenUnicode::from_str(s).unwrap()
}

pub fn write_dump(dir: &Path, dump: &Dump) -> PathBuf {
    let path = dir.join(format!("{}_{}.h5", BASE_NAME, dump.step));
    let file = hdf5::File::create(&path).unwrap();

    let power = file
        .new_dataset::<f64>()
        .shape(dump.power.len())
        .create("power")
        .unwrap();
    power.write_raw(dump.power).unwrap();
    power
        .new_attr::<VarLenUnicode>()
        .create("vsType")
        .unwrap()
        .write_scalar(&text("variable"))
        .unwrap();
    if let Some(zbar) = dump.zbar {
        power
            .new_attr::<f64>()
            .create("zbarTotal")
            .unwrap()
            .write_scalar(&zbar)
            .unwrap();
    }

    let time = file.create_group("time").unwrap();
    time.new_attr::<f64>()
        .create("vsTime")
        .unwrap()
        .write_scalar(&dump.time)
        .unwrap();
    time.new_attr::<i32>()
        .create("vsStep")
        .unwrap()
        .write_scalar(&(dump.step as i32))
        .unwrap();

    let limits = file.create_group("globalLimits").unwrap();
    limits
        .new_attr::<f64>()
        .create("vsLowerBounds")
        .unwrap()
        .write_scalar(&dump.bounds.0)
        .unwrap();
    limits
        .new_attr::<f64>()
        .create("vsUpperBounds")
        .unwrap()
        .write_scalar(&dump.bounds.1)
        .unwrap();

    if dump.run_info {
        let run_info = file.create_group("runInfo").unwrap();
        run_info
            .new_attr::<VarLenUnicode>()
            .create("vsType")
            .unwrap()
            .write_scalar(&text("runInfo"))
            .unwrap();
        run_info
            .new_attr::<f64>()
            .create("lambda_r")
            .unwrap()
            .write_scalar(&1.5e-10)
            .unwrap();
        run_info
            .new_attr::<i32>()
            .create("lastStep")
            .unwrap()
            .write_scalar(&(dump.step as i32))
            .unwrap();

        let seeds = run_info
            .new_dataset::<i32>()
            .shape(3)
            .create("seeds")
            .unwrap();
        seeds.write_raw(&[7, 8, 9][..]).unwrap();

        let build = run_info.create_group("build").unwrap();
        build
            .new_attr::<VarLenUnicode>()
            .create("version")
            .unwrap()
            .write_scalar(&text("3.1.0"))
            .unwrap();
    }

    path
}

/// The three-step series `[0,2,0]`, `[0,4,0]`, `[0,0,0]` at t = 0, 1, 2,
/// written out of order with non-contiguous steps
pub fn write_standard_series(dir: &Path) {
    write_dump(dir, &Dump::new(300, &[0.0, 0.0, 0.0], 2.0));
    write_dump(dir, &Dump::new(5, &[0.0, 2.0, 0.0], 0.0));
    write_dump(dir, &Dump::new(40, &[0.0, 4.0, 0.0], 1.0));
}

pub fn read_text_attr(loc: &hdf5::Location, name: &str) -> String {
    loc.attr(name)
        .unwrap()
        .read_scalar::<VarLenUnicode>()
        .unwrap()
        .as_str()
        .to_owned()
}

pub fn has_member(file: &hdf5::File, name: &str) -> bool {
    file.member_names().unwrap().iter().any(|m| m == name)
}

pub fn has_attr(loc: &hdf5::Location, name: &str) -> bool {
    loc.attr_names().unwrap().iter().any(|a| a == name)
}
