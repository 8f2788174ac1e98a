// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Zenport-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Zenport and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;

use super::report::{ImportEvent, Reporter};
use crate::mapping::IconMapper;
use crate::model::{ContainerIdentity, ContainerRegistry, Space};

/// Colors handed out to new identities in turn.
pub const CONTAINER_PALETTE: [&str; 8] = [
    "blue",
    "turquoise",
    "green",
    "yellow",
    "orange",
    "red",
    "pink",
    "purple",
];

/// Profile key to container id, for one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerAllocation {
    by_profile: HashMap<String, i64>,
    pub created: usize,
    pub reused: usize,
}

impl ContainerAllocation {
    pub fn container_for(&self, space: &Space) -> Option<i64> {
        self.by_profile.get(space.profile.key()).copied()
    }

    pub fn len(&self) -> usize {
        self.by_profile.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_profile.is_empty()
    }
}

/// Gives every distinct profile among `spaces` exactly one container identity.
///
/// The first space using a profile names the identity and picks its icon. An existing public
/// identity with that name and a valid id is reused; otherwise one is appended with the next free
/// id and `last_user_context_id` is advanced.
pub fn allocate_containers(
    spaces: &[Space],
    registry: &mut ContainerRegistry,
    mapper: &dyn IconMapper,
    reporter: &dyn Reporter,
) -> ContainerAllocation {
    let mut allocation = ContainerAllocation::default();
    let mut next_id = registry.max_user_context_id() + 1;

    for space in spaces {
        let key = space.profile.key();
        if allocation.by_profile.contains_key(key) {
            continue;
        }

        let name = if space.title.is_empty() {
            key.to_owned()
        } else {
            space.title.clone()
        };

        let id = match registry.find_by_name(&name).and_then(|i| i.user_context_id) {
            Some(id) => {
                allocation.reused += 1;
                reporter.report(ImportEvent::ContainerReused {
                    name,
                    profile: key.to_owned(),
                    user_context_id: id,
                });
                id
            }
            None => {
                let id = next_id;
                next_id += 1;
                let color = CONTAINER_PALETTE[allocation.created % CONTAINER_PALETTE.len()];
                let icon = mapper.map_container_icon(space.icon_ref().name());
                registry
                    .identities
                    .push(ContainerIdentity::new(id, name.clone(), icon, color));
                registry.last_user_context_id = id;
                allocation.created += 1;
                reporter.report(ImportEvent::ContainerCreated {
                    name,
                    profile: key.to_owned(),
                    user_context_id: id,
                });
                id
            }
        };
        allocation.by_profile.insert(key.to_owned(), id);
    }

    allocation
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::{allocate_containers, CONTAINER_PALETTE};
    use crate::import::report::RecordingReporter;
    use crate::mapping::ZenIconMapper;
    use crate::model::fixtures::{space, space_with_profile};
    use crate::model::{ContainerIdentity, ContainerRegistry};

    #[fixture]
    fn registry() -> ContainerRegistry {
        let mut registry = ContainerRegistry::default();
        let mut personal = ContainerIdentity::new(1, "", "fingerprint", "blue");
        personal.l10n_id = Some("user-context-personal".into());
        registry.identities.push(personal);
        let mut internal = ContainerIdentity::new(
            crate::model::containers::RESERVED_USER_CONTEXT_ID,
            "userContextIdInternal.thumbnail",
            "",
            "",
        );
        internal.public = false;
        registry.identities.push(internal);
        registry.last_user_context_id = 1;
        registry
    }

    #[rstest]
    fn shared_profile_gets_one_identity_named_after_first_space(mut registry: ContainerRegistry) {
        let spaces = [
            space_with_profile("s1", "Foo", &[], "Profile 1"),
            space_with_profile("s2", "Bar", &[], "Profile 1"),
        ];
        let alloc = allocate_containers(&spaces, &mut registry, &ZenIconMapper, &RecordingReporter::new());

        assert_eq!(alloc.len(), 1);
        assert_eq!(alloc.created, 1);
        assert_eq!(alloc.container_for(&spaces[0]), Some(2));
        assert_eq!(alloc.container_for(&spaces[1]), Some(2));

        let created = registry.identities.last().expect("appended");
        assert_eq!(created.name, "Foo");
        assert_eq!(created.user_context_id, Some(2));
        assert!(created.public);
        assert_eq!(registry.last_user_context_id, 2);
    }

    #[rstest]
    fn existing_identity_is_reused(mut registry: ContainerRegistry) {
        registry.identities.push(ContainerIdentity::new(9, "Work", "briefcase", "red"));
        let spaces = [space("s1", "Work", &[])];
        let before = registry.identities.len();

        let alloc = allocate_containers(&spaces, &mut registry, &ZenIconMapper, &RecordingReporter::new());

        assert_eq!(alloc.container_for(&spaces[0]), Some(9));
        assert_eq!((alloc.created, alloc.reused), (0, 1));
        assert_eq!(registry.identities.len(), before);
    }

    #[rstest]
    fn identity_without_valid_id_is_not_reused(mut registry: ContainerRegistry) {
        registry.identities.push(ContainerIdentity::new(0, "Work", "briefcase", "red"));
        let spaces = [space("s1", "Work", &[])];

        let alloc = allocate_containers(&spaces, &mut registry, &ZenIconMapper, &RecordingReporter::new());
        assert_eq!(alloc.container_for(&spaces[0]), Some(2));
        assert_eq!(alloc.created, 1);
    }

    #[rstest]
    fn palette_rotates_over_created_identities_only(mut registry: ContainerRegistry) {
        registry.identities.push(ContainerIdentity::new(5, "Reused", "", ""));
        let mut spaces = vec![space_with_profile("r", "Reused", &[], "reused")];
        for n in 0..9 {
            spaces.push(space_with_profile(&format!("s{n}"), &format!("P{n}"), &[], &format!("p{n}")));
        }

        allocate_containers(&spaces, &mut registry, &ZenIconMapper, &RecordingReporter::new());

        let colors: Vec<_> = registry
            .identities
            .iter()
            .filter(|i| i.name.starts_with('P'))
            .map(|i| i.color.as_str())
            .collect();
        assert_eq!(colors[..8], CONTAINER_PALETTE);
        assert_eq!(colors[8], "blue");
        let ids: Vec<_> = registry
            .identities
            .iter()
            .filter(|i| i.name.starts_with('P'))
            .filter_map(|i| i.user_context_id)
            .collect();
        assert_eq!(ids, (6..15).collect::<Vec<_>>());
    }

    #[rstest]
    fn untitled_space_names_identity_after_profile(mut registry: ContainerRegistry) {
        let mut custom = space_with_profile("s1", "", &[], "Profile 3");
        custom.custom_icon = Some("coffee".into());
        allocate_containers(&[custom], &mut registry, &ZenIconMapper, &RecordingReporter::new());

        let created = registry.identities.last().unwrap();
        assert_eq!(created.name, "Profile 3");
        assert_eq!(created.icon, "food");
    }
}
