use std::fmt::Write;

use propdex_model::{CanonicalId, PropellerTraits};

/// Serialize the identifying fields of `traits` into a clustering key.
///
/// Field order is fixed: manufacturer, `_<diameter>`, `x<pitch>`,
/// `_<degree>deg`, `_<blades>b`, `_t`/`_p`, `_spec<specimen>`. Absent fields
/// contribute nothing; `model`, rpm and role never appear.
pub fn canonical_id(traits: &PropellerTraits) -> CanonicalId {
    let mut id = traits.manufacturer.clone();

    // Writing into a String cannot fail.
    if let Some(diameter) = traits.diameter_in {
        let _ = write!(id, "_{diameter}");
    }
    if let Some(pitch) = traits.pitch_in {
        let _ = write!(id, "x{pitch}");
    }
    if let Some(degree) = traits.degree {
        let _ = write!(id, "_{degree}deg");
    }
    if let Some(blades) = traits.blade_count {
        let _ = write!(id, "_{blades}b");
    }
    if let Some(orientation) = traits.tractor_pusher {
        let _ = write!(id, "_{}", orientation.code());
    }
    if let Some(specimen) = traits.specimen {
        let _ = write!(id, "_spec{specimen}");
    }

    CanonicalId(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use propdex_model::Orientation;

    #[test]
    fn size_only_uses_shortest_number_form() {
        let traits = PropellerTraits::new("x").with_size(10.0, Some(5.0));
        assert_eq!(canonical_id(&traits).as_str(), "x_10x5");

        let traits = PropellerTraits::new("apcsf").with_size(9.0, Some(4.7));
        assert_eq!(canonical_id(&traits).as_str(), "apcsf_9x4.7");
    }

    #[test]
    fn every_field_in_fixed_order() {
        let traits = PropellerTraits {
            degree: Some(20.0),
            blade_count: Some(3),
            tractor_pusher: Some(Orientation::Pusher),
            specimen: Some(2),
            ..PropellerTraits::new("mit").with_size(5.0, Some(4.0))
        };
        assert_eq!(canonical_id(&traits).as_str(), "mit_5x4_20deg_3b_p_spec2");
    }

    #[test]
    fn absent_fields_and_model_are_omitted() {
        let traits = PropellerTraits {
            model: Some("sport".into()),
            ..PropellerTraits::new("nr")
        };
        assert_eq!(canonical_id(&traits).as_str(), "nr");

        let traits = PropellerTraits {
            specimen: Some(1),
            tractor_pusher: Some(Orientation::Pusher),
            model: Some("12p1".into()),
            ..PropellerTraits::new("apc").with_size(12.0, None)
        };
        assert_eq!(canonical_id(&traits).as_str(), "apc_12_p_spec1");
    }

    #[test]
    fn identical_traits_give_identical_ids() {
        let a = PropellerTraits::new("apc").with_size(9.0, Some(6.0));
        let b = a.clone();
        assert_eq!(canonical_id(&a), canonical_id(&b));
    }
}
