//! Unit tests for ev-energy.

#[cfg(test)]
mod linear_model {
    use crate::{LinearModel, PowertrainModel, PredictInput};

    #[test]
    fn flat_model_scales_with_distance() {
        let model = LinearModel::flat(0.04); // 25 mpg equivalent
        let one_mile = PredictInput { speed_mph: 45.0, grade: 0.0, distance_miles: 1.0 };
        let ten_miles = PredictInput { distance_miles: 10.0, ..one_mile };
        assert_eq!(model.predict(&one_mile), 0.04);
        assert_eq!(model.predict(&ten_miles), 0.4);
    }

    #[test]
    fn uphill_costs_more_than_downhill() {
        let model = LinearModel::new(0.04, 0.5);
        let up = PredictInput { speed_mph: 45.0, grade: 0.05, distance_miles: 2.0 };
        let down = PredictInput { grade: -0.05, ..up };
        assert!(model.predict(&up) > model.predict(&down));
    }

    #[test]
    fn steep_descent_predicts_negative_energy() {
        // Regenerative braking territory: the model may go negative and the
        // cost model downstream is responsible for clipping.
        let model = LinearModel::new(0.04, 1.0);
        let descent = PredictInput { speed_mph: 30.0, grade: -0.10, distance_miles: 1.0 };
        assert!(model.predict(&descent) < 0.0);
    }
}

#[cfg(test)]
mod collection {
    use std::sync::Arc;

    use crate::{LinearModel, ModelCollection};

    #[test]
    fn keys_and_lookup() {
        let collection = ModelCollection::new()
            .with("Gasoline", Arc::new(LinearModel::flat(0.04)))
            .with("Electric", Arc::new(LinearModel::flat(0.30)));

        assert_eq!(collection.len(), 2);
        assert!(collection.contains("Gasoline"));
        assert!(collection.get("Electric").is_some());
        assert!(!collection.contains("Diesel"));

        let mut keys: Vec<&str> = collection.keys().collect();
        keys.sort_unstable();
        assert_eq!(keys, ["Electric", "Gasoline"]);
    }

    #[test]
    fn empty_collection() {
        let collection = ModelCollection::new();
        assert!(collection.is_empty());
        assert!(collection.get("Gasoline").is_none());
    }
}
