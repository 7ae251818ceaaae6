/*!
 *  Galileo Network Analytics (GNA) Toolkit
 *
 *  Copyright 2024-2025 Fidelis Farm & Technologies, LLC
 *  All Rights Reserved.
 *  See license information in LICENSE.
 */

//! Unsupervised Monothetic Contrast Criterion (UMCC) discretization.
//!
//! A sample is sorted and recursively split where a Davies-Bouldin style
//! contrast is lowest; the accepted split values become bin edges and the
//! original sample is digitized against them.

pub mod model {
    pub mod binning;
}

pub mod pipeline {
    use dotenv::dotenv;
    use std::collections::HashMap;
    use std::env;
    use std::env::VarError;
    use std::io::Error;
    use std::path::{Path, PathBuf};
    use std::time::Instant;

    pub mod discretize;

    #[cfg(test)]
    mod discretize_test;

    /// Environment variable holding the default options string
    pub const OPTIONS_VARIABLE: &str = "UMCC_OPTIONS";

    pub fn parse_options(options_string: &str) -> Result<HashMap<&str, &str>, String> {
        let mut options: HashMap<&str, &str> = HashMap::new();
        if options_string.trim().is_empty() {
            return Ok(options);
        }

        for option in options_string.split(";").filter(|s| !s.trim().is_empty()) {
            let (key, val) = option
                .split_once("=")
                .ok_or_else(|| format!("error: missing value for option '{}'", option))?;
            options.insert(key.trim(), val.trim());
        }

        Ok(options)
    }

    pub fn load_environment() -> Result<(), VarError> {
        dotenv().ok();
        Ok(())
    }

    /// Options string from the command line, falling back to the environment
    pub fn resolve_options(options_string: &str) -> String {
        if !options_string.is_empty() {
            return options_string.to_string();
        }
        let _ = load_environment();
        env::var(OPTIONS_VARIABLE).unwrap_or_default()
    }

    pub trait FileProcessor {
        fn process(&mut self) -> Result<usize, Error>;
        fn get_command(&self) -> &String;
        fn get_input(&self) -> &String;
        fn get_output(&self) -> &String;

        fn run(&mut self) -> Result<(), Error> {
            let command = self.get_command().clone();
            let input = self.get_input().clone();
            let output = self.get_output().clone();

            println!("{}: input spec: [{}]", command, input);
            println!("{}: output spec: [{}]", command, output);

            //
            // verify the combination of arguments are valid
            //
            if !Path::new(&input).is_file() {
                eprintln!("commandline error: input file {} does not exist", input);
                std::process::exit(exitcode::CONFIG)
            }
            let output_dir = match Path::new(&output).parent() {
                Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
                _ => PathBuf::from("."),
            };
            if !output_dir.is_dir() {
                eprintln!(
                    "commandline error: output directory {} does not exist",
                    output_dir.display()
                );
                std::process::exit(exitcode::CONFIG)
            }

            println!("{}: starting up.", command);
            let start = Instant::now();
            match self.process() {
                Ok(record_count) => {
                    println!(
                        "{}: processed {} record(s) in {:?}",
                        command,
                        record_count,
                        start.elapsed()
                    );
                }
                Err(error) => {
                    eprintln!("{}: processing failed: {}", command, error);
                    std::process::exit(exitcode::IOERR);
                }
            }
            println!("{}: shutting down.", command);
            Ok(())
        }
    }
}
