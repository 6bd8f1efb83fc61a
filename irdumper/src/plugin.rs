// SPDX-License-Identifier: BSD-3-Clause
use std::path::Path;

use llvm_plugin::inkwell::module::Module;
use llvm_plugin::{
    LlvmModulePass, ModuleAnalysisManager, PassBuilder, PipelineParsing, PreservedAnalyses,
};
use tracing::{debug, error, info, level_filters::LevelFilter};

use crate::snapshot::{self, Snapshot};

#[derive(Default)]
struct IrDumperPass {
    snapshot: Snapshot,
}

impl IrDumperPass {
    fn save(&self, module: &Module<'_>, hint: &Path) -> Result<(), snapshot::Error> {
        let path = self.snapshot.prepare(hint)?;
        if !module.write_bitcode_to_path(&path) {
            return Err(snapshot::Error::Write { path });
        }
        debug!("Wrote {}", path.display());
        Ok(())
    }
}

impl LlvmModulePass for IrDumperPass {
    fn run_pass(
        &self,
        module: &mut Module<'_>,
        _manager: &ModuleAnalysisManager,
    ) -> PreservedAnalyses {
        let name = module.get_name().to_string_lossy().into_owned();
        info!("IRDumperPass in module: {name}");
        if let Err(e) = self.save(module, Path::new(&name)) {
            error!("{e}");
        }
        // Snapshotting never changes the module.
        PreservedAnalyses::All
    }
}

#[llvm_plugin::plugin(name = "IRDumper", version = "0.1")]
fn plugin_registrar(builder: &mut PassBuilder) {
    // The host may have loaded another plugin that already set one up.
    let _ = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::INFO)
        .with_writer(std::io::stderr)
        .try_init();

    builder.add_pipeline_start_ep_callback(|manager, _| {
        manager.add_pass(IrDumperPass::default());
    });
    builder.add_module_pipeline_parsing_callback(|name, manager| {
        if name == "ir-dumper" {
            manager.add_pass(IrDumperPass::default());
            PipelineParsing::Parsed
        } else {
            PipelineParsing::NotParsed
        }
    });
}
