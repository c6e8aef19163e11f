use crate::models::material::{ReadingMaterial, Reference};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Reading materials available before any admin edits.
pub fn initial_materials() -> Vec<ReadingMaterial> {
    vec![
        ReadingMaterial {
            id: "mat_neon_supply".to_string(),
            title: "When a war stops the neon: gas supply and chip fabs".to_string(),
            stage_id: "step1".to_string(),
            majors: strings(&["Economics", "International Relations", "Chemistry"]),
            keywords: strings(&["supply chain", "neon", "geopolitics"]),
            content: "## How far does a gas shortage reach?\n\n\
                Lithography lasers need ultra-pure neon, and a large share of it once came \
                from a handful of plants in one region. When conflict interrupted supply, \
                prices jumped and fabs scrambled for alternatives.\n\n\
                ### Questions\n\
                - Who pays when a single supplier fails?\n\
                - How could recycling neon change the picture?"
                .to_string(),
            search_keywords: strings(&["neon shortage semiconductor"]),
            references: vec![Reference {
                title: "Industry reports on specialty gas supply".to_string(),
                url: None,
            }],
            is_generated: false,
        },
        ReadingMaterial {
            id: "mat_fab_water".to_string(),
            title: "A fab drinks like a city: water in chip manufacturing".to_string(),
            stage_id: "step3".to_string(),
            majors: strings(&["Environmental Engineering", "Civil Engineering", "Law"]),
            keywords: strings(&["water", "drought", "ultrapure water"]),
            content: "## Can a drought stop AI?\n\n\
                Wafer cleaning uses enormous volumes of ultrapure water. Regions hosting \
                fabs have faced droughts that forced trucks of water and rationing for \
                farmers.\n\n\
                ### Questions\n\
                - How should water be shared between fabs and residents?\n\
                - What would a water-neutral fab need?"
                .to_string(),
            search_keywords: vec![],
            references: vec![],
            is_generated: false,
        },
        ReadingMaterial {
            id: "mat_datacenter_power".to_string(),
            title: "Power-hungry models: data centers and the grid".to_string(),
            stage_id: "step5".to_string(),
            majors: strings(&["Electrical Engineering", "Urban Planning", "Economics"]),
            keywords: strings(&["electricity", "cooling", "carbon"]),
            content: "## Who gets the electricity?\n\n\
                Training a frontier model can draw as much power as a small town. \
                Utilities now weigh data-center demand against homes and factories, and \
                cooling choices decide how much water is used as well.\n\n\
                ### Questions\n\
                - Should data centers pay more for peak power?\n\
                - Where should the next one be built, and who decides?"
                .to_string(),
            search_keywords: vec![],
            references: vec![],
            is_generated: false,
        },
        ReadingMaterial {
            id: "mat_ai_diagnosis".to_string(),
            title: "The doctor and the algorithm: AI in diagnosis".to_string(),
            stage_id: "step6".to_string(),
            majors: strings(&["Medicine", "Nursing", "Life Sciences", "Psychology"]),
            keywords: strings(&["healthcare", "bias", "privacy"]),
            content: "## Whom do patients trust?\n\n\
                Imaging models flag tumours faster than people in some studies, yet they \
                can miss patients who were under-represented in training data.\n\n\
                ### Questions\n\
                - Who is responsible when an AI-assisted diagnosis is wrong?\n\
                - How should patient data be protected while models learn?"
                .to_string(),
            search_keywords: vec![],
            references: vec![],
            is_generated: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_seed_ids_unique_and_stages_known() {
        let materials = initial_materials();
        let ids: HashSet<_> = materials.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids.len(), materials.len());
        assert!(materials.iter().all(|m| m.has_known_stage()));
        assert!(materials.iter().all(|m| !m.is_generated));
    }
}
