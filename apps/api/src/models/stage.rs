//! The fixed six-step AI/semiconductor value chain every reading material is
//! classified against.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ValueChainStage {
    pub id: &'static str,
    pub label: &'static str,
    pub summary: &'static str,
    pub description: &'static str,
}

pub const VALUE_CHAIN: [ValueChainStage; 6] = [
    ValueChainStage {
        id: "step1",
        label: "Materials & Equipment",
        summary: "Wafers, chemicals, gases and the machines that process them.",
        description: "Silicon wafers, photoresists, specialty gases and lithography or \
            deposition tools. Supply is concentrated in a few countries and firms, so \
            trade policy and resource use matter here.",
    },
    ValueChainStage {
        id: "step2",
        label: "Chip Design",
        summary: "Architects and EDA software turn ideas into circuit blueprints.",
        description: "Fabless companies design GPUs, NPUs and memory controllers with \
            electronic design automation tools. Talent, IP licensing and design cost \
            dominate this step.",
    },
    ValueChainStage {
        id: "step3",
        label: "Fabrication",
        summary: "Foundries print billions of transistors onto wafers.",
        description: "Front-end manufacturing in clean rooms consumes large amounts of \
            water and electricity. Yield, process node and factory safety are the key \
            concerns.",
    },
    ValueChainStage {
        id: "step4",
        label: "Packaging & Test",
        summary: "Dies are cut, stacked, packaged and verified.",
        description: "Advanced packaging such as HBM stacking and chiplets decides how \
            fast AI accelerators can move data. Testing catches defects before chips \
            ship.",
    },
    ValueChainStage {
        id: "step5",
        label: "AI Infrastructure",
        summary: "Data centers and clouds put accelerators to work.",
        description: "Servers, networking and cooling host model training and \
            inference. Power demand, siting and carbon footprint are growing public \
            issues.",
    },
    ValueChainStage {
        id: "step6",
        label: "AI Services & Applications",
        summary: "Models reach people through products in every industry.",
        description: "Healthcare, finance, media, education and public services adopt \
            AI tools. Questions of fairness, privacy, jobs and regulation surface at \
            this step.",
    },
];

pub fn find_stage(id: &str) -> Option<&'static ValueChainStage> {
    VALUE_CHAIN.iter().find(|stage| stage.id == id)
}

pub fn is_known_stage(id: &str) -> bool {
    find_stage(id).is_some()
}
