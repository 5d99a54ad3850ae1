mod property_positions;
