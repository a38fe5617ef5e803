mod artifact;
