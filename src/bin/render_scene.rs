#[macro_use]
extern crate log;

use std::path::PathBuf;

/// argv[0], which the OS is free to leave out
fn program_name(args: &[String]) -> &str {
	args.get(0).map_or("render_scene", String::as_str)
}

fn main() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let args = std::env::args().collect::<Vec<String>>();

	if args.len() < 2 || args.len() > 3 {
		eprintln!("usage: {} scene.json [output.ppm|output.png]", program_name(&args));
		std::process::exit(1);
	}

	let job = match glint::description::load(&args[1]) {
		Ok(job) => job,
		Err(e) => {
			error!("failed to load scene {}: {}", args[1], e);
			std::process::exit(1);
		}
	};

	let output = args.get(2).map_or(job.output, PathBuf::from);

	if glint::render_to_file(&job.scene, &job.camera, &output).is_err() {
		std::process::exit(1);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn program_name_without_argv() {
		assert_eq!(program_name(&[]), "render_scene");
		assert_eq!(program_name(&["glint".to_owned()]), "glint");
	}
}
