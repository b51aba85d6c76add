use anyhow::Context;
use dao_gen::{run, GenConfig, Mode, Opt};
use std::path::PathBuf;
use structopt::StructOpt;

fn main() -> anyhow::Result<()> {
	let opt = Opt::from_args();
	opt.init_logger();

	let config = GenConfig {
		out_path: PathBuf::from("../dao/query"),
		model_path: Some(PathBuf::from("../dao/model")),
		mode: Mode::WITHOUT_CONTEXT | Mode::WITH_DEFAULT_QUERY,
		field_coverable: true,
		with_unit_test: true,
		..GenConfig::default()
	};

	run(&opt, config, |g| {
		let user = g.generate_model("user", &[])?;
		g.apply_basic(vec![user]);
		Ok(())
	})
	.context("code generation failed")?;
	Ok(())
}
